use std::fs;
use std::path::PathBuf;

use bandplot::config::{PathsConfig, PlotJob, RenderConfig, StudyConfig, default_jobs};
use bandplot::output::OutputFormat;
use bandplot::{Case, StudyValue};

fn unique_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "bandplot_config_restore_{}_{}",
        name,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    path
}

fn assert_config_eq(actual: &StudyConfig, expected: &StudyConfig) {
    assert_eq!(actual.paths.input_dir, expected.paths.input_dir);
    assert_eq!(actual.paths.out_dir, expected.paths.out_dir);
    assert_eq!(actual.render.width, expected.render.width);
    assert_eq!(actual.render.height, expected.render.height);
    assert!((actual.render.aspect - expected.render.aspect).abs() <= 1e-12);
    assert!((actual.render.dpi - expected.render.dpi).abs() <= 1e-12);
    assert_eq!(actual.render.format, expected.render.format);
    assert_eq!(actual.jobs, expected.jobs);
}

#[test]
fn config_roundtrip_default_toml() {
    let default_cfg = StudyConfig::default();
    let text = toml::to_string_pretty(&default_cfg).expect("serialize default");
    let parsed: StudyConfig = toml::from_str(&text).expect("parse default");
    assert_config_eq(&parsed, &default_cfg);
    assert!(text.contains("700"), "integer parameter keeps its form");
    assert!(text.contains("100.0"));
}

#[test]
fn config_load_custom_values() {
    let path = unique_path("custom.toml");
    let custom = StudyConfig {
        paths: PathsConfig {
            input_dir: PathBuf::from("sweep/out"),
            out_dir: PathBuf::from("sweep/figs"),
        },
        render: RenderConfig {
            width: 800,
            height: 600,
            aspect: 1.5,
            dpi: 150.0,
            format: OutputFormat::Png,
        },
        jobs: vec![PlotJob {
            case: Case::Costly,
            drop_rate: StudyValue::Float(0.1),
            parameters: vec![StudyValue::Int(50), StudyValue::Float(250.0)],
            discounts: vec![StudyValue::Float(0.8), StudyValue::Float(1.0)],
            iter_limit: Some(300),
        }],
    };
    let text = toml::to_string_pretty(&custom).expect("serialize custom");
    fs::write(&path, text).expect("write custom config");

    let loaded = StudyConfig::load_or_default(&path).expect("load config");
    assert_config_eq(&loaded, &custom);

    let _ = fs::remove_file(&path);
}

#[test]
fn config_missing_file_fallback() {
    let path = unique_path("missing.toml");
    let _ = fs::remove_file(&path);

    let loaded = StudyConfig::load_or_default(&path).expect("load config");
    assert!(path.exists(), "missing config should be created");
    assert_config_eq(&loaded, &StudyConfig::default());

    let _ = fs::remove_file(&path);
}

#[test]
fn config_without_jobs_uses_shipped_study() {
    let text = r#"
[render]
format = "svg"
"#;
    let parsed: StudyConfig = toml::from_str(text).expect("parse partial config");
    assert_eq!(parsed.render.format, OutputFormat::Svg);
    assert_eq!(parsed.jobs, default_jobs());
}

#[test]
fn config_rejects_unknown_case() {
    let text = r#"
[[jobs]]
case = "cheap"
drop_rate = 0.3
parameters = [1]
discounts = [0.9]
"#;
    assert!(toml::from_str::<StudyConfig>(text).is_err());
}

#[test]
fn config_invalid_file_aborts() {
    let path = unique_path("invalid.toml");
    fs::write(&path, "[render]\nwidth = \"wide\"\n").expect("write invalid config");
    let err = StudyConfig::load_or_default(&path).expect_err("invalid config must fail");
    assert!(matches!(err, bandplot::PlotError::Config { .. }), "got {err:?}");
    let _ = fs::remove_file(&path);
}
