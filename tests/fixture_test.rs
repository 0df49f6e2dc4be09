// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Blurb Developers

use std::path::Path;

use blurb::{Action, BlockSpec, run_with_output};

/// Compare `actual` with the content of `expected`, or record it when
/// the expectation does not exist yet or `FIXTURE_UPDATE=1`
fn check_expected(name: &str, what: &str, expected: &Path, actual: &str) -> cu::Result<()> {
    let update_output = std::env::var("FIXTURE_UPDATE").unwrap_or_default().as_str() == "1";
    if !expected.exists() {
        cu::fs::write(expected, actual)?;
        return Ok(());
    }
    let expected_content = cu::fs::read_string(expected)?;
    if expected_content != actual {
        if update_output {
            cu::fs::write(expected, actual)?;
        } else {
            cu::bail!(
                "fixture '{name}' {what} mismatch.\nexpected={expected_content}\nactual={actual}"
            );
        }
    }
    Ok(())
}

/// Run the action and return what it printed, followed by the failure
/// report if there is one
fn run_to_string(action: Action) -> cu::Result<String> {
    let mut out = Vec::new();
    let result = run_with_output(action, &mut out)?;
    let mut out = String::from_utf8_lossy(&out).into_owned();
    if let Err(failure) = result {
        out.push_str(&failure.to_string());
    }
    Ok(out)
}

pub fn run_fixture(stem: &str, ext: &str, blocks: Option<&str>) -> cu::Result<()> {
    cu::init_print_options(cu::lv::Color::Never, cu::lv::Print::QuietQuiet, None);

    let fixtures = Path::new("tests").join("fixtures");
    let input_path = fixtures.join(format!("{stem}.{ext}"));

    cu::debug!("running fixture: {stem}");

    // the copy keeps the extension, which is used by detection
    let input_copy_path = fixtures.join(format!("{stem}_out.{ext}"));
    std::fs::copy(&input_path, &input_copy_path)?;
    let input = input_copy_path.to_string_lossy().into_owned();
    let blocks = blocks.map(BlockSpec::parse).transpose()?;

    let shown = run_to_string(Action::Show {
        inputs: vec![input.clone()],
        style: None,
        blocks: blocks.clone(),
    })?;
    check_expected(
        stem,
        "show",
        &fixtures.join(format!("{stem}_show.txt")),
        &shown,
    )?;

    let uncommented = run_to_string(Action::Uncomment {
        inputs: vec![input.clone()],
        style: None,
        trim: true,
    })?;
    check_expected(
        stem,
        "uncomment",
        &fixtures.join(format!("{stem}_uncomment.txt")),
        &uncommented,
    )?;

    let removed = run_to_string(Action::Remove {
        inputs: vec![input],
        style: None,
        blocks,
        force: false,
        backup: false,
    })?;
    check_expected(
        stem,
        "remove error",
        &fixtures.join(format!("{stem}_fail.txt")),
        &removed,
    )?;

    let actual_output_content = cu::fs::read_string(&input_copy_path)?;
    check_expected(
        stem,
        "output",
        &fixtures.join(format!("{stem}_fixed.txt")),
        &actual_output_content,
    )?;

    Ok(())
}

macro_rules! run_fixture {
    ($name:ident, $ext:literal) => {
        #[test]
        fn $name() -> cu::Result<()> {
            run_fixture(stringify!($name), $ext, None)
        }
    };
    ($name:ident, $ext:literal, $blocks:literal) => {
        #[test]
        fn $name() -> cu::Result<()> {
            run_fixture(stringify!($name), $ext, Some($blocks))
        }
    };
}

run_fixture!(c_license, "c");
run_fixture!(c_second_block, "c", "2");
run_fixture!(shell_hashbang, "sh");
run_fixture!(no_comment, "py");
run_fixture!(haskell_module, "hs");
run_fixture!(pascal_unit, "pas", "1");
run_fixture!(script_js, "js");
run_fixture!(bad_blockspec, "sh", "3");
