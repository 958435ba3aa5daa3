//! Tests for argument parsing, input loading and end-to-end runs.

use std::fs;
use std::io;

use clap::Parser;
use scour_cli::{Cli, Summary, load_config};
use scour_common::ScourError;
use scour_common::warning::{has_warned, set_quiet};
use scour_text::{PipelineStats, Step};

/// Helper to parse arguments the way the binary would
fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("scour").chain(args.iter().copied())).unwrap()
}

/// Helper to run with the given stdin and return (output, summary)
fn run(cli: &Cli, stdin: &str) -> (String, Summary) {
    set_quiet(true);
    let mut out = Vec::new();
    let summary = cli.run(stdin.as_bytes(), &mut out).unwrap();
    (String::from_utf8(out).unwrap(), summary)
}

#[test]
fn test_default_pipeline_encodes_stdin() {
    let (out, _) = run(&cli(&[]), "<a href=\"x\">");
    assert_eq!(out, "&lt;a href=&quot;x&quot;&gt;");
}

#[test]
fn test_steps_run_in_order() {
    let args = cli(&["-s", "strip-tags", "--step", "encode"]);
    assert_eq!(args.steps, vec![Step::StripTags, Step::Encode]);
    let (out, _) = run(&args, "<b>Tom & Jerry</b>");
    assert_eq!(out, "Tom &amp; Jerry");
}

#[test]
fn test_unknown_step_is_rejected() {
    let result = Cli::try_parse_from(["scour", "--step", "shout"]);
    assert!(result.is_err());
}

#[test]
fn test_text_flag_overrides_stdin() {
    let (out, _) = run(&cli(&["--text", "a\nb", "-s", "encode-with-breaks"]), "ignored");
    assert_eq!(out, "a<br class='helma-format' />\nb");
}

#[test]
fn test_text_conflicts_with_path() {
    assert!(Cli::try_parse_from(["scour", "--text", "x", "file.txt"]).is_err());
}

#[test]
fn test_reads_file_argument() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("page.html");
    fs::write(&path, "<p>hi</p>").unwrap();

    let (out, summary) = run(&cli(&["-s", "strip-tags", path.to_str().unwrap()]), "");
    assert_eq!(out, "hi");
    assert_eq!(
        summary,
        Summary {
            input_chars: 9,
            output_chars: 2,
            pipeline: PipelineStats {
                dropped: 7,
                unterminated: false,
                steps_changed: 1,
            },
        }
    );
}

#[test]
fn test_missing_file_reports_path() {
    let args = cli(&["definitely-not-here.txt"]);
    match args.input(io::empty()) {
        Err(ScourError::Io { path, .. }) => {
            assert_eq!(path.to_str(), Some("definitely-not-here.txt"));
        }
        other => panic!("Expected Io error, got {other:?}"),
    }
}

#[test]
fn test_invalid_utf8_stdin() {
    let args = cli(&[]);
    let bytes: &[u8] = &[0x66, 0xff, 0x6f];
    assert!(matches!(
        args.input(bytes),
        Err(ScourError::InvalidUtf8 { ref path }) if path == "-"
    ));
}

#[test]
fn test_config_file_supplies_steps() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("pipeline.json");
    fs::write(
        &config,
        r#"{ "steps": ["strip-tags", "encode-with-breaks"], "break_fragment": "<br>" }"#,
    )
    .unwrap();

    let loaded = load_config(&config).unwrap();
    assert_eq!(loaded.steps, vec![Step::StripTags, Step::EncodeWithBreaks]);

    let (out, _) = run(&cli(&["-c", config.to_str().unwrap()]), "<i>x</i>\ny");
    assert_eq!(out, "x<br>\ny");
}

#[test]
fn test_step_flags_replace_config_steps() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("pipeline.json");
    fs::write(&config, r#"{ "steps": ["strip-tags"] }"#).unwrap();

    let args = cli(&["-c", config.to_str().unwrap(), "-s", "encode"]);
    assert_eq!(args.pipeline().unwrap().steps(), &[Step::Encode]);
}

#[test]
fn test_bad_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("broken.json");
    fs::write(&config, "{ not json").unwrap();

    let err = load_config(&config).unwrap_err();
    assert!(matches!(err, ScourError::Config { .. }));

    let args = cli(&["-c", config.to_str().unwrap()]);
    let mut out = Vec::new();
    let err = args.run(io::empty(), &mut out).unwrap_err();
    assert_eq!(err.to_string(), "could not build pipeline");
    assert!(out.is_empty());
}

#[test]
fn test_unterminated_tag_summary() {
    let (out, summary) = run(&cli(&["-s", "strip-tags", "--stats"]), "keep <lost");
    assert_eq!(out, "keep ");
    assert!(summary.pipeline.unterminated);
    assert_eq!(summary.pipeline.dropped, 5);
}

#[test]
fn test_unterminated_warning_names_the_unclosed_tag() {
    let (out, summary) = run(&cli(&["-s", "strip-tags"]), "a<b<c");
    assert_eq!(out, "a");
    assert_eq!(summary.pipeline.dropped, 4);
    assert!(has_warned(
        "strip",
        "unterminated tag: everything from the unclosed '<' onward was dropped"
    ));
}

#[test]
fn test_empty_input() {
    let (out, summary) = run(&cli(&["-q"]), "");
    assert_eq!(out, "");
    assert_eq!(summary.input_chars, 0);
}
