use std::fs;

use serde::Deserialize;

use common::assertions::{assert_contains_all, assert_contains_none, assert_print_layout};
use mail2pdf::{BundledAssets, ConvertOptions, Converter, EmlSource, Error, Language, PdfOutput};
use test_utils::{eml_path, fake_pdf_html, FakeEngine};

mod common;

#[derive(Debug, Deserialize)]
struct TestCase {
    file: String,
    #[serde(default)]
    language: Language,
    contains: Vec<String>,
    excludes: Vec<String>,
}

const REGRESSION_TEST_CASES_PATH: &str = "tests/regression-test-cases.json";

#[tokio::test]
async fn test_convert_regression() -> anyhow::Result<()> {
    let json_str = fs::read_to_string(REGRESSION_TEST_CASES_PATH)?;
    let test_cases: Vec<TestCase> = serde_json::from_str(&json_str)?;

    for case in test_cases {
        let engine = FakeEngine::default();
        let converter = Converter::new(engine.clone(), BundledAssets);
        let options = ConvertOptions::default().language(case.language);

        let output = converter.convert(eml_path(&case.file), &options).await?;

        let PdfOutput::Single(pdf) = output else {
            panic!("{}: expected a single pdf", case.file);
        };
        let html = fake_pdf_html(&pdf);
        assert_contains_all(&case.file, &html, &case.contains);
        assert_contains_none(&case.file, &html, &case.excludes);
        assert_print_layout(&engine.stats().layouts());
        assert_eq!(1, engine.stats().closed());
    }

    Ok(())
}

#[tokio::test]
async fn test_convert_fixture_batch() -> anyhow::Result<()> {
    let files = ["plain.eml", "html-attachments.eml", "group.eml", "minimal.eml"];
    let engine = FakeEngine::default();
    let converter = Converter::new(engine.clone(), BundledAssets);

    let sources: Vec<EmlSource> = files.iter().map(|file| eml_path(file).into()).collect();
    let output = converter.convert(sources, &ConvertOptions::default()).await?;

    let pdfs = output.into_vec();
    assert_eq!(files.len(), pdfs.len());
    assert!(fake_pdf_html(&pdfs[0]).contains("<title>Now THATS A LOT OF RUST</title>"));
    assert!(fake_pdf_html(&pdfs[1]).contains("<title>Quarterly report</title>"));
    assert!(fake_pdf_html(&pdfs[2]).contains("<title>Group delivery</title>"));
    assert!(fake_pdf_html(&pdfs[3]).contains("<title></title>"));
    assert_eq!(1, engine.stats().launched());
    assert_eq!(1, engine.stats().closed());
    Ok(())
}

#[tokio::test]
async fn test_convert_fixture_batch_with_empty_email() {
    let engine = FakeEngine::default();
    let converter = Converter::new(engine.clone(), BundledAssets);
    let sources: Vec<EmlSource> = vec![eml_path("plain.eml").into(), eml_path("empty.eml").into()];

    let result = converter.convert(sources, &ConvertOptions::default()).await;

    assert!(matches!(result, Err(Error::Parse(_))));
    assert_eq!(1, engine.stats().closed());
}

#[tokio::test]
async fn test_convert_missing_file() {
    let converter = Converter::new(FakeEngine::default(), BundledAssets);

    let result = converter.convert(eml_path("missing.eml"), &ConvertOptions::default()).await;

    assert!(matches!(result, Err(Error::InputRead { .. })));
}

#[tokio::test]
#[ignore = "requires a Chromium installation"]
async fn test_mail2pdf_with_chromium() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let out_path = dir.path().join("plain.pdf");

    let output = mail2pdf::mail2pdf(eml_path("plain.eml"), ConvertOptions::default().out_path(&out_path)).await?;

    let pdf = output.single().ok_or_else(|| anyhow::anyhow!("expected a single pdf"))?;
    assert!(pdf.starts_with(b"%PDF-"));
    assert_eq!(pdf, fs::read(&out_path)?.as_slice());
    Ok(())
}
