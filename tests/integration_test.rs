use std::{path::Path, process::Command};

use tempfile::TempDir;

/// Runs the generator binary in `dir` with a clean configuration environment.
fn run_generator(dir: &Path, envs: &[(&str, &str)]) -> std::process::Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_placeholder-icons"));
    command
        .current_dir(dir)
        .env_remove("PLACEHOLDER_ICONS_CONFIG")
        .env("RUST_LOG", "off");
    for (key, value) in envs {
        command.env(key, value);
    }
    command.output().expect("Failed to run placeholder-icons")
}

#[test]
fn test_default_run_creates_assets() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    let output = run_generator(temp_dir.path(), &[]);

    if !output.status.success() {
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("placeholder-icons failed");
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let assets = temp_dir.path().join("public").join("assets");
    for size in [16u32, 32, 48, 128] {
        let path = assets.join(format!("icon-{size}.png"));
        let icon = image::open(&path).expect("Failed to load generated icon");
        assert_eq!(icon.width(), size);
        assert_eq!(icon.height(), size);
        assert!(stdout.contains(&format!("icon-{size}.png")), "stdout: {stdout}");
    }
    assert!(stdout.contains("✅ Basic PNG icons created!"));
    assert!(stdout.contains("🎨 For production, replace with professionally designed icons"));
}

#[test]
fn test_environment_overrides() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    let output = run_generator(
        temp_dir.path(),
        &[
            ("PLACEHOLDER_ICONS__OUTPUT_DIR", "dist"),
            ("PLACEHOLDER_ICONS__SIZES", "20,40"),
        ],
    );

    assert!(output.status.success());
    for size in [20u32, 40] {
        let icon = image::open(temp_dir.path().join("dist").join(format!("icon-{size}.png")))
            .expect("Failed to load generated icon");
        assert_eq!(icon.width(), size);
    }
    assert!(!temp_dir.path().join("public").exists());
}

#[test]
fn test_config_file_is_read() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    std::fs::write(
        temp_dir.path().join("placeholder-icons.toml"),
        "sizes = [64]\nfile_prefix = \"tile\"\n",
    )
    .unwrap();

    let output = run_generator(temp_dir.path(), &[]);

    assert!(output.status.success());
    let assets = temp_dir.path().join("public").join("assets");
    assert!(assets.join("tile-64.png").exists());
    assert!(!assets.join("icon-16.png").exists());
}

#[test]
fn test_failure_is_tolerated() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    let output = run_generator(
        temp_dir.path(),
        &[("PLACEHOLDER_ICONS__BACKGROUND", "definitely-not-a-color")],
    );

    assert!(output.status.success(), "degraded runs still exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("❌ Error creating icons"), "stdout: {stdout}");
    assert!(stdout.contains("💡 Continuing without custom icons"));
    assert!(!temp_dir.path().join("public").exists());
}

#[test]
fn test_config_path_variable_is_read() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let settings = temp_dir.path().join("settings").join("icons.toml");
    std::fs::create_dir_all(settings.parent().unwrap()).unwrap();
    std::fs::write(&settings, "output_dir = \"out\"\nsizes = [24]\n").unwrap();
    // Lower precedence than the explicit file
    std::fs::write(
        temp_dir.path().join("placeholder-icons.toml"),
        "sizes = [64]\noutput_dir = \"local\"\n",
    )
    .unwrap();

    let output = run_generator(
        temp_dir.path(),
        &[("PLACEHOLDER_ICONS_CONFIG", settings.to_str().unwrap())],
    );

    assert!(output.status.success());
    let icon = image::open(temp_dir.path().join("out").join("icon-24.png"))
        .expect("Failed to load generated icon");
    assert_eq!(icon.width(), 24);
    assert!(!temp_dir.path().join("local").exists());
}

#[test]
fn test_missing_config_path_is_tolerated() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let missing = temp_dir.path().join("nope.toml");

    let output = run_generator(
        temp_dir.path(),
        &[("PLACEHOLDER_ICONS_CONFIG", missing.to_str().unwrap())],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("❌ Error creating icons"), "stdout: {stdout}");
    assert!(!temp_dir.path().join("public").exists());
}
