use snapdeck::{
    Direction, Error, FontSize, SegmentOptions, Studio, StudioConfig, StyleConfig, Template,
};

fn carousel_config(max_words: usize) -> StudioConfig {
    let mut config = StudioConfig::carousel();
    config.segment = SegmentOptions::with_max_words(max_words);
    config
}

#[tokio::test]
async fn single_short_input_becomes_one_rendered_chunk() {
    let studio = Studio::new(carousel_config(50)).await.unwrap();
    let count = studio.set_input("Hello world. This is a test.").await.unwrap();
    assert_eq!(count, 1);

    let snapshot = studio.snapshot().await.unwrap();
    assert_eq!(snapshot.chunks.len(), 1);
    assert_eq!(snapshot.chunks[0].content, "Hello world. This is a test");
    assert_eq!(snapshot.chunks[0].order, 1);
    assert!(snapshot.chunks[0].has_image);
    studio.close().await.unwrap();
}

#[tokio::test]
async fn blank_line_paragraphs_become_ordered_chunks() {
    let studio = Studio::new(carousel_config(50)).await.unwrap();
    studio
        .set_input("First paragraph here.\n\nSecond paragraph here.")
        .await
        .unwrap();

    let snapshot = studio.snapshot().await.unwrap();
    assert_eq!(snapshot.chunks.len(), 2);
    assert_eq!(snapshot.chunks[0].content, "First paragraph here");
    assert_eq!(snapshot.chunks[1].content, "Second paragraph here");
    assert_eq!(snapshot.chunks[0].order, 1);
    assert_eq!(snapshot.chunks[1].order, 2);
    studio.close().await.unwrap();
}

#[tokio::test]
async fn removing_the_only_chunk_is_a_noop() {
    let studio = Studio::new(carousel_config(50)).await.unwrap();
    studio.set_input("Only one slide worth of text").await.unwrap();

    let cursor = studio.remove_chunk().await.unwrap();
    assert_eq!(cursor, 0);

    let snapshot = studio.snapshot().await.unwrap();
    assert_eq!(snapshot.chunks.len(), 1);
    assert_eq!(snapshot.chunks[0].content, "Only one slide worth of text");
    studio.close().await.unwrap();
}

#[tokio::test]
async fn export_with_no_rendered_images_aborts() {
    // A fresh studio holds one empty chunk; nothing is renderable.
    let studio = Studio::new(StudioConfig::carousel()).await.unwrap();
    match studio.export_all().await {
        Err(Error::EmptyExport) => {}
        other => panic!("expected EmptyExport, got {other:?}"),
    }
    studio.close().await.unwrap();
}

#[tokio::test]
async fn whitespace_only_carousel_input_is_rejected() {
    let studio = Studio::new(StudioConfig::carousel()).await.unwrap();
    match studio.set_input("   \n\n \t  ").await {
        Err(Error::InvalidInput(_)) => {}
        other => panic!("expected InvalidInput, got {other:?}"),
    }
    // The store is untouched by the rejected submission.
    let snapshot = studio.snapshot().await.unwrap();
    assert_eq!(snapshot.chunks.len(), 1);
    studio.close().await.unwrap();
}

#[tokio::test]
async fn editing_a_chunk_rerenders_it() {
    let studio = Studio::new(carousel_config(50)).await.unwrap();
    studio.set_input("Original text").await.unwrap();

    let before = studio.export_current().await.unwrap();
    studio.update_current("Edited text").await.unwrap();
    let after = studio.export_current().await.unwrap();

    assert_ne!(before.png_data, after.png_data);
    studio.close().await.unwrap();
}

#[tokio::test]
async fn navigation_clamps_at_both_ends() {
    let studio = Studio::new(carousel_config(4)).await.unwrap();
    studio
        .set_input("One two three. Four five six. Seven eight nine.")
        .await
        .unwrap();

    assert_eq!(studio.navigate(Direction::Prev).await.unwrap(), 0);
    assert_eq!(studio.navigate(Direction::Next).await.unwrap(), 1);
    assert!(!studio.jump(99).await.unwrap());
    assert!(studio.jump(0).await.unwrap());
    studio.close().await.unwrap();
}

#[tokio::test]
async fn style_change_rerenders_every_slide() {
    let studio = Studio::new(carousel_config(50)).await.unwrap();
    studio.set_input("Same content either way").await.unwrap();
    let before = studio.export_current().await.unwrap();

    studio
        .set_style(StyleConfig {
            template: Template::Minimal,
            font_size: FontSize::Large,
        })
        .await
        .unwrap();
    let after = studio.export_current().await.unwrap();

    assert_ne!(before.png_data, after.png_data);
    studio.close().await.unwrap();
}

#[tokio::test]
async fn batch_export_produces_a_zip_of_all_slides() {
    let studio = Studio::new(carousel_config(4)).await.unwrap();
    let count = studio
        .set_input("One two three. Four five six. Seven eight nine.")
        .await
        .unwrap();
    assert!(count > 1);

    let archive = studio.export_all().await.unwrap();
    assert_eq!(&archive[0..4], b"PK\x03\x04");
    studio.close().await.unwrap();
}

#[tokio::test]
async fn code_mode_passes_input_through_unsegmented() {
    let studio = Studio::new(StudioConfig::code()).await.unwrap();
    let count = studio
        .set_input("fn main() {\n    println!(\"hello\");\n}\n")
        .await
        .unwrap();
    assert_eq!(count, 1);

    let exported = studio.export_current().await.unwrap();
    assert_eq!(exported.filename, "code-image-01.png");
    assert_eq!(&exported.png_data[0..8], b"\x89PNG\r\n\x1a\n");
    studio.close().await.unwrap();
}

#[tokio::test]
async fn oversized_carousel_input_is_truncated() {
    let studio = Studio::new(StudioConfig::carousel()).await.unwrap();
    let input = "word ".repeat(2000);
    studio.set_input(&input).await.unwrap();

    let snapshot = studio.snapshot().await.unwrap();
    let total: usize = snapshot.chunks.iter().map(|c| c.character_count).sum();
    assert!(total <= snapdeck::CAROUSEL_CHAR_LIMIT);
    studio.close().await.unwrap();
}
