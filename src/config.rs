use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use thiserror::Error;
use tracing::{info, warn};

use crate::report::model::ReportContext;
use crate::report::storage::{FileStorage, DEFAULT_QUOTA_BYTES};

const APP_DIR: &str = "hr-onboarding-report";

/// Per-user data directory, or `data` under the working directory when the
/// platform has none.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("data"))
}

/// Onboarding and departure donut charts with a local snapshot cache.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON report context handed to the widget when it is mounted.
    /// Without it the widget falls back to the cached snapshot.
    #[arg(short, long)]
    pub context: Option<PathBuf>,

    /// Directory holding the cached report snapshot.
    #[arg(short, long, default_value_os_t = default_data_dir())]
    pub data_dir: PathBuf,

    /// Which flavour of the widget to run.
    #[arg(long, value_enum, default_value_t = Variant::Standard)]
    pub variant: Variant,

    /// Storage capacity in bytes; writes beyond it are refused.
    #[arg(long, default_value_t = DEFAULT_QUOTA_BYTES)]
    pub quota_bytes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// Department filter shown, snapshot cache enabled.
    Standard,
    /// Context only: no department filter, nothing persisted.
    Demo,
}

/// Per-deployment differences between widget flavours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub title_onboarding: String,
    pub title_offboarding: String,
    pub show_departments: bool,
    pub persist: bool,
}

impl ReportConfig {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Standard => Self::default(),
            Variant::Demo => Self {
                show_departments: false,
                persist: false,
                ..Self::default()
            },
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title_onboarding: "Onboarding".to_owned(),
            title_offboarding: "Departure".to_owned(),
            show_departments: true,
            persist: true,
        }
    }
}

/// Opens the snapshot directory, but only for variants that persist.
///
/// `None` means snapshots are not written to disk, either because the
/// variant never saves or because the directory could not be created.
pub fn open_storage(config: &ReportConfig, args: &Args) -> Option<FileStorage> {
    if !config.persist {
        info!("snapshot cache disabled for this variant");
        return None;
    }

    match fs::create_dir_all(&args.data_dir) {
        Ok(()) => {
            info!(dir = %args.data_dir.display(), "report snapshots kept on disk");
            Some(FileStorage::new(args.data_dir.clone(), args.quota_bytes))
        }
        Err(err) => {
            warn!(%err, dir = %args.data_dir.display(), "data directory unavailable, snapshots kept in memory");
            None
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read report context {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("report context {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub fn load_context(path: &Path) -> Result<ReportContext, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use super::*;

    #[test]
    fn variants_differ_only_in_filter_and_persistence() {
        let standard = ReportConfig::for_variant(Variant::Standard);
        let demo = ReportConfig::for_variant(Variant::Demo);

        assert_eq!(standard.title_onboarding, "Onboarding");
        assert_eq!(standard.title_offboarding, "Departure");
        assert!(standard.show_departments && standard.persist);
        assert_eq!(demo.title_onboarding, standard.title_onboarding);
        assert!(!demo.show_departments);
        assert!(!demo.persist);
    }

    #[test]
    fn args_default_to_standard_variant() {
        let args = Args::parse_from(["hr-onboarding-report"]);

        assert_eq!(args.variant, Variant::Standard);
        assert_eq!(args.data_dir, default_data_dir());
        assert_eq!(args.quota_bytes, DEFAULT_QUOTA_BYTES);
        assert!(args.context.is_none());
    }

    #[test]
    fn args_accept_demo_and_context() {
        let args = Args::parse_from([
            "hr-onboarding-report",
            "--variant",
            "demo",
            "--context",
            "report.json",
        ]);

        assert_eq!(args.variant, Variant::Demo);
        assert_eq!(args.context, Some(PathBuf::from("report.json")));
    }

    fn args_with_dir(dir: &Path) -> Args {
        Args::parse_from([
            OsStr::new("hr-onboarding-report"),
            OsStr::new("--data-dir"),
            dir.as_os_str(),
        ])
    }

    #[test]
    fn persisting_variant_creates_the_data_dir() {
        let root = tempfile::tempdir().expect("temp dir");
        let dir = root.path().join("snapshots");

        let storage = open_storage(&ReportConfig::for_variant(Variant::Standard), &args_with_dir(&dir));

        assert!(storage.is_some());
        assert!(dir.is_dir());
    }

    #[test]
    fn demo_variant_leaves_the_disk_alone() {
        let root = tempfile::tempdir().expect("temp dir");
        let dir = root.path().join("snapshots");

        let storage = open_storage(&ReportConfig::for_variant(Variant::Demo), &args_with_dir(&dir));

        assert!(storage.is_none());
        assert!(!dir.exists());
    }

    #[test]
    fn context_file_is_loaded() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("context.json");
        fs::write(
            &path,
            r#"{"report_data": {"onboarding_stats": {"IT": 2}}, "date_from": "2025-01-01",
                "departments": ["IT"]}"#,
        )
        .expect("write context");

        let context = load_context(&path).expect("valid context");

        assert_eq!(context.date_from, "2025-01-01");
        assert_eq!(context.departments[0].to_string(), "IT");
        assert!(context.live_payload().is_some());
    }

    #[test]
    fn broken_context_file_is_reported() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("context.json");
        fs::write(&path, "{").expect("write context");

        assert!(matches!(load_context(&path), Err(ConfigError::Parse { .. })));
        assert!(matches!(
            load_context(&dir.path().join("missing.json")),
            Err(ConfigError::Read { .. })
        ));
    }
}
