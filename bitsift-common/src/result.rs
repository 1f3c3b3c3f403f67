pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// Guards a constructor argument: when the condition does not hold, returns
/// an `InvalidArgument` error naming the argument and the violated
/// condition from the enclosing function.
#[macro_export]
macro_rules! verify_arg {
    ($name:ident, $condition:expr) => {
        if !$condition {
            return Err($crate::error::Error::invalid_arg(
                stringify!($name),
                stringify!($condition),
            ));
        }
    };
}

/// Guards one entry of a line-oriented input: when the condition does not
/// hold, fails with a `Format` error carrying the offending line number and
/// the given reason.
pub fn verify_entry(condition: bool, line: u64, reason: &str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(crate::error::Error::format(line, reason))
    }
}
