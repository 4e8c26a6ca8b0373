//! Shared instants and the canonical mixed-source scenario.

use super::builders::{LegacyRecordBuilder, ModernRecordBuilder};
use labnotes_core::{config::Config, LegacyRecord, ModernRecord, Pipeline};

/// 2024-03-05T14:07:09Z, on a whole second.
pub const T0: i64 = 1_709_647_629_000;

/// Pipeline with the embedded default configuration (UTC, one-second window).
pub fn default_pipeline() -> Pipeline {
    Pipeline::from_config(&Config::defaults())
}

/// One legacy row by staff id 210 at `T0`, then one modern submission split
/// over two attachment rows 300 ms apart.
pub fn scenario() -> (Vec<LegacyRecord>, Vec<ModernRecord>) {
    let legacy = vec![LegacyRecordBuilder::new("L-1").author_id("210").at(T0).build()];
    let modern = vec![
        ModernRecordBuilder::new("L-1")
            .author("Jane Doe")
            .notes("check sample")
            .at(T0 + 5_000)
            .attachment("x.pdf")
            .build(),
        ModernRecordBuilder::new("L-1")
            .author("Jane Doe")
            .notes("check sample")
            .at(T0 + 5_300)
            .attachment("y.pdf")
            .build(),
    ];
    (legacy, modern)
}
