use rand::RngExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Geometric};

use super::record::SyntheticRecord;
use crate::constants::{CONTROL_THRESHOLD, MARKER};
use crate::record::Fix;
use crate::record::field_table::{DECODED_FIELDS, min_decodable_len};

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct StreamNoiseConfig {
    pub seed: Option<u64>,
    /// Printable non-marker bytes sent before the first record
    #[serde(default)]
    pub leading_garbage: usize,
    pub control: Option<ControlNoiseConfig>,
    pub missing: Option<MissingFieldConfig>,
    pub truncation: Option<TruncationConfig>,
}

impl StreamNoiseConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_leading_garbage(mut self, count: usize) -> Self {
        self.leading_garbage = count;
        self
    }

    pub fn with_control(mut self, mean_gap: f64, max_run: usize) -> Self {
        self.control = Some(ControlNoiseConfig { mean_gap, max_run });
        self
    }

    pub fn with_missing(mut self, probability: f64) -> Self {
        self.missing = Some(MissingFieldConfig { probability });
        self
    }

    pub fn with_truncation(mut self, probability: f64) -> Self {
        self.truncation = Some(TruncationConfig { probability });
        self
    }
}

/// Runs of control bytes scattered through the stream.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct ControlNoiseConfig {
    /// Mean number of data bytes between runs
    pub mean_gap: f64,
    pub max_run: usize,
}

/// Per-field chance of being replaced by the sentinel.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct MissingFieldConfig {
    pub probability: f64,
}

/// Per-record chance of being cut below the decodable length.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct TruncationConfig {
    pub probability: f64,
}

/// A generated byte stream and what decoding it should yield.
#[derive(Clone, Debug)]
pub struct GeneratedStream {
    pub bytes: Vec<u8>,
    /// Records after missing-field injection
    pub records: Vec<SyntheticRecord>,
    /// Per record: the fix, or `None` when it was truncated
    pub expected: Vec<Option<Fix>>,
}

impl GeneratedStream {
    pub fn expected_fixes(&self) -> Vec<Fix> {
        self.expected.iter().flatten().copied().collect()
    }

    pub fn truncated_count(&self) -> usize {
        self.expected.iter().filter(|e| e.is_none()).count()
    }
}

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

/// Inserts control-byte runs at geometrically distributed gaps.
struct ControlInjector {
    gaps: Geometric,
    max_run: usize,
    countdown: u64,
}

impl ControlInjector {
    fn new(config: &ControlNoiseConfig, rng: &mut ChaCha8Rng) -> Option<Self> {
        let p = 1.0 / config.mean_gap.max(1.0);
        let gaps = Geometric::new(p).ok()?;
        let countdown = gaps.sample(rng);
        Some(Self {
            gaps,
            max_run: config.max_run.max(1),
            countdown,
        })
    }

    fn push(&mut self, out: &mut Vec<u8>, byte: u8, rng: &mut ChaCha8Rng) {
        if self.countdown == 0 {
            let run = rng.random_range(1..=self.max_run);
            out.extend((0..run).map(|_| rng.random_range(0..=CONTROL_THRESHOLD)));
            self.countdown = self.gaps.sample(rng);
        } else {
            self.countdown -= 1;
        }
        out.push(byte);
    }
}

pub fn generate_stream(records: &[SyntheticRecord], config: &StreamNoiseConfig) -> GeneratedStream {
    let mut rng = create_rng(config.seed);
    let mut injector = config
        .control
        .as_ref()
        .and_then(|c| ControlInjector::new(c, &mut rng));

    let mut bytes = Vec::new();
    for _ in 0..config.leading_garbage {
        let b = rng.random_range(CONTROL_THRESHOLD + 1..=0x7e);
        bytes.push(if b == MARKER { b'#' } else { b });
    }

    let mut out_records = Vec::with_capacity(records.len());
    let mut expected = Vec::with_capacity(records.len());

    for record in records {
        let mut record = record.clone();
        if let Some(ref missing) = config.missing {
            let p = missing.probability.clamp(0.0, 1.0);
            for kind in DECODED_FIELDS {
                if rng.random_bool(p) {
                    record.missing.push(kind);
                }
            }
        }

        let mut encoded = record.encode();
        let truncated = config
            .truncation
            .as_ref()
            .is_some_and(|t| rng.random_bool(t.probability.clamp(0.0, 1.0)));
        if truncated {
            encoded.truncate(rng.random_range(1..min_decodable_len()));
            expected.push(None);
        } else {
            expected.push(Some(record.expected_fix()));
        }

        for b in encoded {
            match injector {
                Some(ref mut inj) => inj.push(&mut bytes, b, &mut rng),
                None => bytes.push(b),
            }
        }
        out_records.push(record);
    }

    // Close the final record.
    bytes.push(MARKER);

    GeneratedStream {
        bytes,
        records: out_records,
        expected,
    }
}

/// `count` random records run through `generate_stream`.
pub fn generate_random_stream(count: usize, config: &StreamNoiseConfig) -> GeneratedStream {
    let mut rng = create_rng(config.seed.map(|s| s ^ 0x5eed));
    let records: Vec<SyntheticRecord> = (0..count)
        .map(|_| SyntheticRecord::random(&mut rng))
        .collect();
    generate_stream(&records, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_stream_is_concatenated_records() {
        let records = vec![SyntheticRecord::sample(); 2];
        let stream = generate_stream(&records, &StreamNoiseConfig::default().with_seed(1));
        let mut expected = records[0].encode();
        expected.extend(records[1].encode());
        expected.push(MARKER);
        assert_eq!(stream.bytes, expected);
        assert_eq!(stream.expected_fixes().len(), 2);
    }

    #[test]
    fn test_control_noise_only_adds_control_bytes() {
        let records = vec![SyntheticRecord::sample(); 5];
        let config = StreamNoiseConfig::default()
            .with_seed(3)
            .with_control(4.0, 3);
        let stream = generate_stream(&records, &config);

        let stripped: Vec<u8> = stream
            .bytes
            .iter()
            .copied()
            .filter(|&b| b > CONTROL_THRESHOLD)
            .collect();
        assert!(stream.bytes.len() > stripped.len());
        assert_eq!(stripped.len(), 5 * records[0].encode().len() + 1);
    }

    #[test]
    fn test_seed_is_reproducible() {
        let config = StreamNoiseConfig::default()
            .with_seed(11)
            .with_control(8.0, 2)
            .with_missing(0.2)
            .with_truncation(0.2);
        let a = generate_random_stream(20, &config);
        let b = generate_random_stream(20, &config);
        assert_eq!(a.bytes, b.bytes);
        assert_eq!(a.expected, b.expected);
    }
}
