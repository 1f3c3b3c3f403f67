//! Terms and the numeric model relating frequency, IDF class and rank.

/// 64-bit term hash.
pub type TermHash = u64;

/// Identifies the document stream a term was drawn from (e.g. body, title).
pub type StreamId = u8;

/// Number of words in the term (1 for unigrams, 2 for bigram phrases, etc.).
pub type GramSize = u8;

/// Inverse document frequency times ten, rounded to the nearest integer.
///
/// A term appearing in one document out of `10^i` has IDF `i` and IDF class
/// `10 * i`. Classes are clamped to [`MAX_IDF_X10`], so the classes form a
/// compact table index for per-term decisions.
pub type IdfX10 = u8;

/// Logarithmic row compression level. A rank-`r` row stores one bit per
/// `2^r` documents.
pub type Rank = usize;

/// Highest representable IDF class (IDF 9.0, one document in a billion).
pub const MAX_IDF_X10: IdfX10 = 90;

/// Highest rank the wider system can materialize.
pub const MAX_RANK: Rank = 6;

/// Number of valid ranks, `0..=MAX_RANK`.
pub const RANK_COUNT: usize = MAX_RANK + 1;

/// Largest gram size tracked by the index.
pub const MAX_GRAM_SIZE: GramSize = 8;

/// A term as seen by the treatment planner: a hash of its text, the stream
/// it was found in, its gram size, and its bucketed inverse document
/// frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Term {
    hash: TermHash,
    gram_size: GramSize,
    stream_id: StreamId,
    idf: IdfX10,
}

impl Term {
    /// Creates a term from a precomputed hash and its corpus frequency.
    /// The IDF class is derived from the frequency and clamped to
    /// [`MAX_IDF_X10`].
    pub fn new(hash: TermHash, gram_size: GramSize, stream_id: StreamId, frequency: f64) -> Term {
        Term {
            hash,
            gram_size,
            stream_id,
            idf: compute_idf_x10(frequency, MAX_IDF_X10),
        }
    }

    /// Creates a term with an explicit IDF class. The class is clamped to
    /// [`MAX_IDF_X10`].
    pub fn with_idf(hash: TermHash, gram_size: GramSize, stream_id: StreamId, idf: IdfX10) -> Term {
        Term {
            hash,
            gram_size,
            stream_id,
            idf: idf.min(MAX_IDF_X10),
        }
    }

    /// Creates a term by hashing raw text with xxh3. The gram size is the
    /// number of whitespace-separated words, clamped to [`MAX_GRAM_SIZE`].
    pub fn from_text(text: &str, stream_id: StreamId, frequency: f64) -> Term {
        let hash = xxhash_rust::xxh3::xxh3_64(text.as_bytes());
        let gram_size = text
            .split_whitespace()
            .count()
            .clamp(1, MAX_GRAM_SIZE as usize) as GramSize;
        Term::new(hash, gram_size, stream_id, frequency)
    }

    pub fn hash(&self) -> TermHash {
        self.hash
    }

    pub fn gram_size(&self) -> GramSize {
        self.gram_size
    }

    pub fn stream_id(&self) -> StreamId {
        self.stream_id
    }

    pub fn idf(&self) -> IdfX10 {
        self.idf
    }
}

/// Buckets a corpus frequency into an IDF class: `round(-10 * log10(f))`,
/// clamped to `[0, max]`. Frequencies at or above 1 map to class 0 and
/// non-positive frequencies to `max`.
pub fn compute_idf_x10(frequency: f64, max: IdfX10) -> IdfX10 {
    if frequency >= 1.0 {
        return 0;
    }
    if frequency <= 0.0 {
        return max;
    }
    let idf = (-10.0 * frequency.log10()).round();
    (idf as u64).min(max as u64) as IdfX10
}

/// Converts an IDF class back to a corpus frequency, `10^(-idf/10)`.
pub fn idf_x10_to_frequency(idf: IdfX10) -> f64 {
    10f64.powf(-(idf as f64) / 10.0)
}

/// Fraction of rank-`rank` row chunks that contain at least one occurrence of
/// a term with corpus frequency `frequency`: `1 - (1 - f)^(2^rank)`, under
/// the assumption that document occurrences are independent.
///
/// The power is evaluated by repeated squaring so that the result is
/// reproducible across platforms regardless of libm.
pub fn frequency_at_rank(frequency: f64, rank: Rank) -> f64 {
    if frequency <= 0.0 {
        return 0.0;
    }
    if frequency >= 1.0 {
        return 1.0;
    }
    let mut absent = 1.0 - frequency;
    for _ in 0..rank {
        absent *= absent;
    }
    1.0 - absent
}

/// Number of shared rows of the given bit density that must be intersected
/// for a term of frequency `frequency` to reach the signal-to-noise ratio
/// `snr`: the smallest `k >= 1` with `(density - f)^k <= f / snr`.
///
/// A term with `frequency >= density` cannot share a row at all and gets a
/// single private row, so the count is 1. A non-positive `snr` imposes no
/// floor and also yields 1.
pub fn compute_row_count(frequency: f64, density: f64, snr: f64) -> u32 {
    if frequency >= density || snr <= 0.0 {
        return 1;
    }
    let target = frequency / snr;
    let per_row_noise = density - frequency;
    let mut count = 1;
    let mut noise = per_row_noise;
    while noise > target {
        noise *= per_row_noise;
        count += 1;
    }
    count
}

/// Largest rank at which a term of frequency `frequency` still fits within
/// `max_density` set bits, clamped to [`MAX_RANK`]. Returns 0 when the term
/// exceeds `max_density` even at rank 0.
pub fn compute_max_rank(frequency: f64, max_density: f64) -> Rank {
    let mut rank = 0;
    while rank < MAX_RANK && frequency_at_rank(frequency, rank + 1) <= max_density {
        rank += 1;
    }
    rank
}
