use std::{io::Cursor, sync::Arc};

use docbrief::{
    config::Config,
    processing::{
        Document, LengthTier, Provenance, SummaryPipeline,
        extract::{ImageOcrExtractor, OcrEngine, TesseractEngine, TextExtractor},
    },
    summarization::build_summarization_client,
};

fn live_config() -> Config {
    Config::from_env().expect("configuration from environment")
}

/// White canvas with a few solid bars; enough for tesseract to run end to end.
fn sample_png() -> Vec<u8> {
    let mut image = image::GrayImage::from_pixel(1200, 300, image::Luma([255]));
    for x in 100..1100 {
        for y in (60..240).step_by(60) {
            for dy in 0..12 {
                image.put_pixel(x, y + dy, image::Luma([0]));
            }
        }
    }
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, image::ImageFormat::Png)
        .expect("encode png");
    bytes.into_inner()
}

#[tokio::test]
#[ignore = "Requires a tesseract binary with English language data"]
async fn live_tesseract_runs_on_normalized_image() {
    let config = live_config();
    let engine = TesseractEngine::new(config.tesseract_path.clone());
    let normalized = ImageOcrExtractor::normalize(&sample_png()).expect("normalize");

    let outcome = engine.recognize(&normalized).await;
    assert!(
        outcome.is_ok(),
        "tesseract should start and process the image: {outcome:?}"
    );
}

#[tokio::test]
#[ignore = "Requires a tesseract binary with English language data"]
async fn live_ocr_extractor_reports_empty_or_text() {
    let config = live_config();
    let extractor =
        ImageOcrExtractor::new(Arc::new(TesseractEngine::new(config.tesseract_path.clone())));

    match extractor.extract(&sample_png()).await {
        Ok(text) => assert!(!text.as_str().trim().is_empty()),
        Err(failure) => assert_eq!(
            failure.reason(),
            "empty",
            "engine should initialize: {failure}"
        ),
    }
}

#[tokio::test]
#[ignore = "Requires a configured live summarization provider"]
async fn live_provider_generates_summary() {
    let config = live_config();
    let client = build_summarization_client(&config)
        .expect("client")
        .expect("SUMMARIZATION_PROVIDER and credentials must be configured");

    let summary = client
        .generate_summary(
            "Please provide a brief summary of the following text in 2-3 sentences.\n\n\
             The city council met on Tuesday and approved funding for two new parks.\n\nSummary:",
        )
        .await
        .expect("provider should answer");
    assert!(!summary.trim().is_empty());
}

#[tokio::test]
#[ignore = "Requires a live provider and DOCBRIEF_LIVE_PDF pointing at a text-bearing PDF"]
async fn live_pipeline_prefers_generative_summary() {
    let config = live_config();
    let pipeline = SummaryPipeline::from_config(&config).expect("pipeline");
    let path = std::env::var("DOCBRIEF_LIVE_PDF").expect("DOCBRIEF_LIVE_PDF must be set");
    let document = Document::new(
        "live.pdf",
        std::fs::read(&path).expect("DOCBRIEF_LIVE_PDF readable"),
    )
    .expect("document");

    let summary = pipeline
        .run(document, LengthTier::Short)
        .await
        .expect("summary");
    assert_eq!(summary.provenance, Provenance::Generative);
}
