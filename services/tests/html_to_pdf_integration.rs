use services::{html_to_pdf, PageLayout, PdfEngine, PdfSession};

const HTML: &str = "<html><head><title>Integration</title></head><body><p>hello world</p></body></html>";

#[tokio::test]
#[ignore = "requires a Chromium installation"]
async fn test_html_to_pdf() -> anyhow::Result<()> {
    let session = html_to_pdf().launch().await?;

    let rendered = session.render(HTML, &PageLayout::default()).await;
    session.close().await?;

    let pdf = rendered?;
    assert!(pdf.starts_with(b"%PDF-"));
    let text = String::from_utf8_lossy(&pdf);
    assert!(text.contains("/MediaBox [0 0 59"), "expected an A4 media box");
    Ok(())
}

#[tokio::test]
#[ignore = "requires a Chromium installation"]
async fn test_session_renders_concurrently() -> anyhow::Result<()> {
    let session = html_to_pdf().launch().await?;
    let layout = PageLayout::default();

    let rendered = futures::future::try_join_all(
        (0..3).map(|_| session.render(HTML, &layout))
    ).await;
    session.close().await?;

    assert_eq!(rendered?.len(), 3);
    Ok(())
}
