use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::CliTest;

const PAPER: &str = r"\section{Introduction}
Prior work % todo cite the survey
is extensive. % done fix typo
Growth was 50\% todo this is not a comment
    % question: is this bound tight?
";

#[test]
fn test_prefix_layout() -> Result<()> {
    let test = CliTest::with_file("paper.tex", PAPER)?;

    assert_cmd_snapshot!(test.command().arg("paper.tex"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    paper.tex:2:TODO:cite the survey
    paper.tex:3:DONE:fix typo
    paper.tex:5:QUESTION:is this bound tight?

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_heading_layout_without_resolved() -> Result<()> {
    let test = CliTest::with_file("paper.tex", PAPER)?;

    assert_cmd_snapshot!(test.command().args(["--heading", "always", "-D", "paper.tex"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    paper.tex
    2:TODO:cite the survey
    5:QUESTION:is this bound tight?

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_suppressed_fields() -> Result<()> {
    let test = CliTest::with_file("paper.tex", PAPER)?;

    assert_cmd_snapshot!(test.command().args(["-L", "-B", "paper.tex"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    paper.tex:cite the survey
    paper.tex:fix typo
    paper.tex:is this bound tight?

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_continuation() -> Result<()> {
    let test = CliTest::with_file(
        "notes.tex",
        "Some text. % todo message message\n           %      message2 message2\n% todo 测试\n%    再次测试\n",
    )?;

    assert_cmd_snapshot!(test.command().args(["-c", "notes.tex"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    notes.tex:1:TODO:message message message2 message2
    notes.tex:3:TODO:测试再次测试

    ----- stderr -----
    ");

    // without -c the indented lines are plain comments
    assert_cmd_snapshot!(test.command().arg("notes.tex"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    notes.tex:1:TODO:message message
    notes.tex:3:TODO:测试

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_directory_shallow_and_recursive() -> Result<()> {
    let test = CliTest::with_file("docs/main.tex", "% todo main\n")?;
    test.write_file("docs/chapters/intro.tex", "% todo intro\n")?;
    test.write_file("docs/figure.txt", "% todo not a tex file\n")?;

    assert_cmd_snapshot!(test.command().arg("docs"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    docs/main.tex:1:TODO:main

    ----- stderr -----
    ");

    assert_cmd_snapshot!(test.command().args(["-r", "docs"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    docs/chapters/intro.tex:1:TODO:intro
    docs/main.tex:1:TODO:main

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_unreadable_document_does_not_stop_scan() -> Result<()> {
    let test = CliTest::with_file("good.tex", "% todo still reported\n")?;
    test.write_file("bad.tex", b"% todo \xff\xfe broken\n")?;

    assert_cmd_snapshot!(test.command().args(["bad.tex", "good.tex"]), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    good.tex:1:TODO:still reported

    ----- stderr -----
    warning: 1 document(s) could not be read (use -v for details)
    ");

    let output = test.command().args(["-v", "bad.tex", "missing.tex"]).output()?;
    let stderr = String::from_utf8(output.stderr)?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("warning: missing.tex: no such file or directory"));
    assert!(stderr.contains("warning: bad.tex: invalid UTF-8 text"));

    Ok(())
}

#[test]
fn test_legacy_encoding() -> Result<()> {
    let test = CliTest::new()?;
    let (bytes, _, _) = encoding_rs::GBK.encode("% todo 测试\n");
    test.write_file("gbk.tex", bytes.as_ref())?;

    assert_cmd_snapshot!(test.command().args(["--encoding", "gbk", "gbk.tex"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    gbk.tex:1:TODO:测试

    ----- stderr -----
    ");

    let output = test.command().args(["--encoding", "klingon", "gbk.tex"]).output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8(output.stderr)?.contains("Unknown encoding: klingon"));

    Ok(())
}

#[test]
fn test_stdin() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run_with_stdin(
        &["-c"],
        "x % todo read from\n  %      stdin\ny % problem solved\n",
    )?;
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "1:TODO:read from stdin\n3:SOLVED\n"
    );

    Ok(())
}

#[test]
fn test_json_output() -> Result<()> {
    let test = CliTest::with_file("paper.tex", PAPER)?;

    let output = test.command().args(["--json", "-D", "paper.tex"]).output()?;
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(
        value,
        serde_json::json!([
            {
                "file": "paper.tex",
                "line": 2,
                "key": "todo",
                "label": "TODO",
                "status": "active",
                "message": "cite the survey"
            },
            {
                "file": "paper.tex",
                "line": 5,
                "key": "question",
                "label": "QUESTION",
                "status": "active",
                "message": "is this bound tight?"
            }
        ])
    );

    Ok(())
}

#[test]
fn test_absolute_paths() -> Result<()> {
    let test = CliTest::with_file("paper.tex", "% todo here\n")?;

    let output = test.command().args(["-a", "paper.tex"]).output()?;
    let expected = format!("{}:1:TODO:here\n", test.root().join("paper.tex").display());
    assert_eq!(String::from_utf8(output.stdout)?, expected);

    Ok(())
}
