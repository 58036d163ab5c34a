//! Tests for the CLI layer: argument parsing, session driver, exit codes

use std::io::Cursor;

use clap::Parser;
use rstest::rstest;

use rstreemap::application::services::{SourceKind, TreemapSession};
use rstreemap::application::ApplicationError;
use rstreemap::cli::args::{Cli, Commands};
use rstreemap::cli::commands::run_session;
use rstreemap::cli::CliError;
use rstreemap::domain::{DatasetPaths, DomainError, NodeSpec, RandomColors, Rect, TreeBuilder};
use rstreemap::exitcode;
use rstreemap::infrastructure::InfraError;
use rstreemap::util::testing;

fn session() -> TreemapSession {
    testing::init_test_setup();
    let spec = NodeSpec::branch(
        "R",
        vec![NodeSpec::leaf("A", 30), NodeSpec::leaf("B", 70)],
    );
    let tree = TreeBuilder::build(spec, Box::new(DatasetPaths), Box::new(RandomColors::seeded(9)))
        .expect("build tree");
    TreemapSession::new(tree, Rect::new(0, 0, 100, 10)).expect("session")
}

fn drive(input: &str) -> String {
    let mut session = session();
    let mut out = Vec::new();
    run_session(&mut session, Cursor::new(input), &mut out).expect("run session");
    String::from_utf8(out).expect("utf8 output")
}

// ============================================================
// Argument parsing
// ============================================================

#[test]
fn given_path_when_parsing_layout_then_filesystem_source() {
    // Act
    let cli = Cli::try_parse_from(["rstreemap", "layout", "/tmp", "--width", "300"]).unwrap();

    // Assert
    match cli.command {
        Some(Commands::Layout { source, viewport }) => {
            assert_eq!(source.kind(), SourceKind::FileSystem("/tmp".into()));
            assert_eq!(viewport.width, Some(300));
            assert_eq!(viewport.height, None);
        }
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn given_population_flag_when_parsing_then_population_source() {
    // Act
    let cli = Cli::try_parse_from(["rstreemap", "-dd", "tree", "--population"]).unwrap();

    // Assert
    assert_eq!(cli.debug, 2);
    match cli.command {
        Some(Commands::Tree { source }) => assert_eq!(source.kind(), SourceKind::Population),
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn given_negative_coordinates_when_parsing_locate_then_accepted() {
    // Act
    let cli = Cli::try_parse_from(["rstreemap", "locate", ".", "-x", "-5", "-y", "3"]).unwrap();

    // Assert
    match cli.command {
        Some(Commands::Locate { x, y, .. }) => assert_eq!((x, y), (-5, 3)),
        other => panic!("unexpected command {:?}", other),
    }
}

#[rstest]
#[case(&["rstreemap", "layout"])]
#[case(&["rstreemap", "layout", "/tmp", "--population"])]
fn given_bad_source_args_when_parsing_then_rejected(#[case] args: &[&str]) {
    // Act
    let result = Cli::try_parse_from(args.iter().copied());

    // Assert
    assert!(result.is_err());
}

// ============================================================
// Session driver
// ============================================================

#[test]
fn given_click_and_grow_when_driving_session_then_status_lines_are_written() {
    // Act
    let out = drive("click 5 5\ngrow\nquit\nclick 50 5\n");

    // Assert
    assert_eq!(out, "R\\A  30\nR\\A  31\n");
}

#[test]
fn given_frame_when_driving_session_then_one_line_per_tile() {
    // Act
    let out = drive("frame\n");

    // Assert
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("0 0 30 10 #"));
    assert!(lines[1].starts_with("30 0 70 10 #"));
}

#[test]
fn given_delete_when_driving_session_then_deleted_leaf_is_reported() {
    // Act
    let out = drive("delete 50 5\n\nframe\ndelete 50 5\ndelete 1 1\n");

    // Assert
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "deleted R\\B  70");
    assert!(lines[1].starts_with("0 0 100 10 #"));
    assert_eq!(lines[2], "deleted R\\A  30");
    assert_eq!(lines[3], "nothing to delete");
}

#[test]
fn given_garbage_line_when_driving_session_then_it_is_skipped() {
    // Act
    let out = drive("dance\nclick 95 9\n");

    // Assert
    assert_eq!(out, "R\\B  70\n");
}

// ============================================================
// Exit codes
// ============================================================

#[rstest]
#[case(CliError::Usage("x".into()), exitcode::USAGE)]
#[case(
    CliError::from(DomainError::InvalidRectangle { width: 1, height: 1 }),
    exitcode::USAGE
)]
#[case(CliError::from(DomainError::AlreadyEmpty), exitcode::DATAERR)]
#[case(
    CliError::from(ApplicationError::unavailable("fetch", "timeout")),
    exitcode::UNAVAILABLE
)]
#[case(
    CliError::from(ApplicationError::Config { message: "bad".into() }),
    exitcode::CONFIG
)]
#[case(
    CliError::from(InfraError::io("read", std::io::Error::other("boom"))),
    exitcode::IOERR
)]
fn given_error_when_mapping_then_sysexits_code(#[case] error: CliError, #[case] expected: i32) {
    // Assert
    assert_eq!(error.exit_code(), expected);
}
