use aspectarian_config::{
    load_aspect_settings, load_aspect_settings_from, read_aspects_toml_text, AspectSettings,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

// The working directory is process-wide, so tests that move it run one at a time.
static CWD_LOCK: Mutex<()> = Mutex::new(());

struct CwdGuard {
    previous: PathBuf,
}

impl CwdGuard {
    fn enter(dir: &Path) -> Self {
        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir).unwrap();
        Self { previous }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.previous);
    }
}

/// `<root>/a/b`, so both relative search paths stay inside `root`
fn nested_workdir(root: &Path) -> PathBuf {
    let workdir = root.join("a").join("b");
    std::fs::create_dir_all(&workdir).unwrap();
    workdir
}

#[test]
fn test_load_settings_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[aspects]\nminor_orb_ceiling = 2.5\nstationary_speed = 0.001\n\n[aspects.object_orbs]\nmoon = 10.0"
    )
    .unwrap();

    let settings = load_aspect_settings_from(file.path()).unwrap();
    assert_eq!(settings.minor_orb_ceiling, 2.5);
    assert_eq!(settings.stationary_speed, 0.001);
    assert_eq!(settings.display_exact_orb, 1.0);
    assert_eq!(settings.orb_override("moon"), Some(10.0));
}

#[test]
fn test_load_settings_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_aspect_settings_from(dir.path().join("nope.toml")).unwrap_err();
    assert!(err.to_string().contains("nope.toml"));
}

#[test]
fn test_invalid_file_names_the_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[aspects]\nminor_orb_ceiling = \"wide\"").unwrap();

    let err = load_aspect_settings_from(file.path()).unwrap_err();
    assert!(err.to_string().contains("Invalid aspect settings"));
}

#[test]
fn test_empty_document_is_default() {
    assert_eq!(AspectSettings::from_toml_str("").unwrap(), AspectSettings::default());
}

#[test]
fn test_settings_found_in_working_directory() {
    let _lock = CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let root = tempfile::tempdir().unwrap();
    let workdir = nested_workdir(root.path());
    std::fs::create_dir_all(workdir.join("configs")).unwrap();
    std::fs::write(
        workdir.join("configs/aspects.toml"),
        "[aspects]\nminor_orb_ceiling = 2.0\n\n[aspects.object_orbs]\nsun = 12.0",
    )
    .unwrap();

    let _cwd = CwdGuard::enter(&workdir);
    let text = read_aspects_toml_text().unwrap();
    assert!(text.contains("minor_orb_ceiling = 2.0"));

    let settings = load_aspect_settings().unwrap();
    assert_eq!(settings.minor_orb_ceiling, 2.0);
    assert_eq!(settings.orb_override("sun"), Some(12.0));
}

#[test]
fn test_settings_found_two_levels_up() {
    let _lock = CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let root = tempfile::tempdir().unwrap();
    let workdir = nested_workdir(root.path());
    std::fs::create_dir_all(root.path().join("configs")).unwrap();
    std::fs::write(
        root.path().join("configs/aspects.toml"),
        "[aspects]\nexact_orb = 0.5",
    )
    .unwrap();

    let _cwd = CwdGuard::enter(&workdir);
    let settings = load_aspect_settings().unwrap();
    assert_eq!(settings.exact_orb, 0.5);
    assert_eq!(settings.minor_orb_ceiling, AspectSettings::default().minor_orb_ceiling);
}

#[test]
fn test_missing_settings_fall_back_to_defaults() {
    let _lock = CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let root = tempfile::tempdir().unwrap();
    let workdir = nested_workdir(root.path());

    let _cwd = CwdGuard::enter(&workdir);
    let err = read_aspects_toml_text().unwrap_err();
    assert!(err.to_string().contains("Could not load aspects.toml"));
    assert_eq!(load_aspect_settings().unwrap(), AspectSettings::default());
}
