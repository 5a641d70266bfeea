mod noise;
mod record;

pub use noise::{
    ControlNoiseConfig, GeneratedStream, MissingFieldConfig, StreamNoiseConfig, TruncationConfig,
    generate_random_stream, generate_stream,
};
pub use record::{SAMPLE_RESERVED, SyntheticCoordinate, SyntheticRecord};
