//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn url() -> Option<String> {
        None
    }

    pub fn author() -> String {
        "Nameless".into()
    }

    pub fn email() -> String {
        "".into()
    }

    pub fn description() -> String {
        "Feed".into()
    }

    pub fn language() -> String {
        "en".into()
    }

    pub fn locale() -> String {
        "en_US.UTF-8".into()
    }

    pub fn base_path() -> String {
        "".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn posts() -> PathBuf {
        "posts".into()
    }

    pub fn pages() -> PathBuf {
        "pages".into()
    }

    pub fn output() -> PathBuf {
        "_build".into()
    }

    pub fn statics() -> PathBuf {
        "static".into()
    }

    pub fn templates() -> PathBuf {
        "templates".into()
    }

    pub fn extra_dirs() -> Vec<PathBuf> {
        Vec::new()
    }

    pub fn max_entries() -> usize {
        10
    }

    pub fn default_category() -> String {
        "Miscellaneous".into()
    }

    /// Display-weight step table for the tag cloud, indexed by frequency.
    /// Cosmetic tuning; frequencies past the end clamp to the last step.
    pub fn tag_cloud_steps() -> Vec<u32> {
        vec![0, 14, 21, 27, 32, 38, 42, 45, 47, 48]
    }

    pub mod feed {
        use std::path::PathBuf;

        pub fn format() -> String {
            "atom".into()
        }

        pub fn path() -> PathBuf {
            "feed.xml".into()
        }
    }

    pub mod date_format {
        pub fn entry() -> String {
            "%c".into()
        }

        pub fn home() -> String {
            "%b %e, %Y".into()
        }

        pub fn list() -> String {
            "%Y-%m-%d".into()
        }
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        4000
    }
}
