//! Sample records for `labnotes --demo`.
//!
//! Two legacy audit-log rows followed by a modern submission split across
//! three attachment rows, plus a second modern submission outside the
//! grouping window.

use labnotes_core::{LegacyRecord, ModernRecord};

pub const DEMO_SPECIMEN: &str = "S24-00417";

pub fn records() -> (Vec<LegacyRecord>, Vec<ModernRecord>) {
    let names = vec!["RIVERA, MARISOL".to_string()];

    let legacy = vec![
        LegacyRecord {
            specimen_number: DEMO_SPECIMEN.to_string(),
            names: names.clone(),
            notes: "Received frozen section; gross description dictated.".to_string(),
            author_id: "210".to_string(),
            created_at: Some("2024-03-05 09:12:44".to_string()),
            last_modified_at: Some("2024-03-05 09:30:02".to_string()),
        },
        LegacyRecord {
            specimen_number: DEMO_SPECIMEN.to_string(),
            names: names.clone(),
            notes: "Additional levels requested.".to_string(),
            author_id: "999".to_string(),
            created_at: Some("2024-03-06 14:02:10".to_string()),
            last_modified_at: None,
        },
    ];

    let submission = |attachment: &str, created_at: &str| ModernRecord {
        specimen_number: DEMO_SPECIMEN.to_string(),
        names: names.clone(),
        notes: "Outside consult received, scanned into chart.".to_string(),
        author_name: "Jane Doe".to_string(),
        created_at: Some(created_at.to_string()),
        modified_at: None,
        attachment: Some(attachment.to_string()),
    };

    let modern = vec![
        submission("consult-letter.pdf", "2024-03-08T16:45:00.120Z"),
        submission("slides-photo-1.jpg", "2024-03-08T16:45:00.480Z"),
        submission("consult-letter.pdf", "2024-03-08T16:45:00.700Z"),
        ModernRecord {
            specimen_number: DEMO_SPECIMEN.to_string(),
            names,
            notes: "Final sign-out comment.".to_string(),
            author_name: "Sam Okafor".to_string(),
            created_at: Some("2024-03-09T10:00:00Z".to_string()),
            modified_at: Some("2024-03-09T10:05:00Z".to_string()),
            attachment: None,
        },
    ];

    (legacy, modern)
}
