//! Tests for RenderService against the real file system

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use treerender::application::services::RenderService;
use treerender::application::ApplicationError;
use treerender::domain::RenderStyle;
use treerender::infrastructure::traits::RealFileSystem;
use treerender::util::testing;

/// Helper to create temp input files for testing
fn create_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write input file");
    path
}

fn service() -> RenderService {
    RenderService::new(Arc::new(RealFileSystem), RenderStyle::default())
}

#[test]
fn given_fixture_when_rendering_file_then_writes_expected_output() {
    testing::init_test_setup();
    // Arrange
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("out.txt");

    // Act
    let report = service()
        .render_file(
            PathBuf::from("tests/resources/trees/nested.txt").as_path(),
            &output,
            true,
        )
        .unwrap();

    // Assert
    let expected = fs::read_to_string("tests/resources/trees/nested.expected.txt").unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), expected);
    assert_eq!(report.nodes, 9);
    assert_eq!(report.depth, 3);
    assert_eq!(report.lines, 9);
}

#[test]
fn given_input_without_tree_when_rendering_file_then_output_is_empty() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("out.txt");

    let report = service()
        .render_file(
            PathBuf::from("tests/resources/trees/empty.txt").as_path(),
            &output,
            true,
        )
        .unwrap();

    assert_eq!(report.lines, 0);
    assert_eq!(fs::read_to_string(&output).unwrap(), "");
}

#[test]
fn given_existing_output_when_rendering_file_then_replaces_it() {
    let temp = TempDir::new().unwrap();
    let input = create_file(&temp, "in.txt", "(5)");
    let output = create_file(&temp, "out.txt", "stale content\nmore\n");

    service().render_file(&input, &output, true).unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), "5\n");
}

#[test]
fn given_missing_input_when_rendering_file_then_input_unreadable() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("missing.txt");
    let output = temp.path().join("out.txt");

    let err = service().render_file(&input, &output, true).unwrap_err();

    assert!(matches!(err, ApplicationError::InputUnreadable(_)));
    assert!(err.to_string().contains("unable to read input file"));
    assert!(!output.exists());
}

#[test]
fn given_directory_as_input_when_rendering_file_then_input_unreadable() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("out.txt");

    let err = service().render_file(temp.path(), &output, true).unwrap_err();

    assert!(matches!(err, ApplicationError::InputUnreadable(_)));
}

#[test]
fn given_directory_as_output_when_rendering_file_then_output_not_writable() {
    let temp = TempDir::new().unwrap();
    let input = create_file(&temp, "in.txt", "(1)");
    let output = temp.path().join("sub");
    fs::create_dir(&output).unwrap();

    let err = service().render_file(&input, &output, true).unwrap_err();

    assert!(matches!(err, ApplicationError::OutputNotWritable(_)));
}

#[test]
fn given_readonly_output_when_rendering_file_then_output_not_writable() {
    let temp = TempDir::new().unwrap();
    let input = create_file(&temp, "in.txt", "(1)");
    let output = create_file(&temp, "out.txt", "keep me");
    let mut perms = fs::metadata(&output).unwrap().permissions();
    perms.set_readonly(true);
    fs::set_permissions(&output, perms).unwrap();

    let err = service().render_file(&input, &output, true).unwrap_err();

    assert!(matches!(err, ApplicationError::OutputNotWritable(_)));
    assert_eq!(fs::read_to_string(&output).unwrap(), "keep me");
}

#[test]
fn given_no_overwrite_when_output_exists_then_output_exists_error() {
    let temp = TempDir::new().unwrap();
    let input = create_file(&temp, "in.txt", "(1)");
    let output = create_file(&temp, "out.txt", "keep me");

    let err = service().render_file(&input, &output, false).unwrap_err();

    assert!(matches!(err, ApplicationError::OutputExists(_)));
    assert_eq!(fs::read_to_string(&output).unwrap(), "keep me");
}

#[test]
fn given_no_overwrite_when_output_missing_then_renders() {
    let temp = TempDir::new().unwrap();
    let input = create_file(&temp, "in.txt", "(1(2))");
    let output = temp.path().join("out.txt");

    service().render_file(&input, &output, false).unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), "1---+\n    2\n");
}

#[test]
fn given_overflowing_numeral_when_rendering_file_then_no_output_written() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("out.txt");

    let err = service()
        .render_file(
            PathBuf::from("tests/resources/trees/overflow.txt").as_path(),
            &output,
            true,
        )
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Domain(_)));
    assert!(!output.exists());
}

#[test]
fn given_overflowing_numeral_when_output_exists_then_output_untouched() {
    let temp = TempDir::new().unwrap();
    let input = create_file(&temp, "in.txt", "(1 2 99999999999999999999)");
    let output = create_file(&temp, "out.txt", "previous run\n");

    assert!(service().render_file(&input, &output, true).is_err());

    assert_eq!(fs::read_to_string(&output).unwrap(), "previous run\n");
}

#[cfg(unix)]
#[test]
fn given_symlinked_output_when_rendering_file_then_link_kept_and_target_written() {
    use std::os::unix::fs::symlink;

    let temp = TempDir::new().unwrap();
    let input = create_file(&temp, "in.txt", "(1(2))");
    let target = create_file(&temp, "real.txt", "old");
    let link = temp.path().join("out.txt");
    symlink(&target, &link).unwrap();

    service().render_file(&input, &link, true).unwrap();

    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert_eq!(fs::read_to_string(&target).unwrap(), "1---+\n    2\n");
}

#[cfg(unix)]
#[test]
fn given_shared_output_mode_when_rendering_file_then_mode_preserved() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let input = create_file(&temp, "in.txt", "(5)");
    let output = create_file(&temp, "out.txt", "old");
    fs::set_permissions(&output, fs::Permissions::from_mode(0o644)).unwrap();

    service().render_file(&input, &output, true).unwrap();

    let mode = fs::metadata(&output).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o644);
    assert_eq!(fs::read_to_string(&output).unwrap(), "5\n");
}
