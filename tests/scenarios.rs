//! End-to-end streaming scenarios against an in-memory document.

use flywheel_markup::{
    Document, FinalFlush, FrameOutcome, MemoryDocument, SessionState, StreamWriter, WriterConfig,
};
use std::time::{Duration, Instant};

fn writer_at<D: Document>(document: D) -> StreamWriter<D> {
    StreamWriter::with_config(
        document,
        WriterConfig {
            min_render_interval: Duration::ZERO,
            ..WriterConfig::default()
        },
    )
}

#[test]
fn paragraph_previews_then_finalizes() {
    let mut writer = writer_at(MemoryDocument::new());
    writer.start_session(false);

    writer.write_chunk("<p>Hel");
    writer.render_now();
    assert_eq!(writer.document().text(), "<p>Hel</p>");

    writer.write_chunk("lo wor");
    writer.render_now();
    assert_eq!(writer.document().text(), "<p>Hello wor</p>");

    writer.write_chunk("ld</p>");
    writer.render_now();
    writer.stop_session();
    assert_eq!(writer.document().text(), "<p>Hello world</p>");
}

#[test]
fn list_withheld_until_complete() {
    let mut writer = writer_at(MemoryDocument::new());
    writer.start_session(false);

    writer.write_chunk("<ul><li>A</li>");
    assert_eq!(writer.render_now(), FrameOutcome::Unchanged);
    assert_eq!(writer.document().text(), "");
    assert_eq!(writer.document().revision(), 0);

    writer.write_chunk("<li>B</li></ul>");
    writer.render_now();
    assert_eq!(writer.document().text(), "<ul><li>A</li><li>B</li></ul>");
}

#[test]
fn abort_freezes_last_preview() {
    let mut writer = writer_at(MemoryDocument::new());
    writer.start_session(false);
    writer.write_chunk("<h2>Draft");
    writer.render_now();
    let revision = writer.document().revision();

    writer.write_chunk(" title</h2><p>more");
    writer.abort_session();
    assert_eq!(writer.state(), SessionState::Idle);
    assert_eq!(writer.document().text(), "<h2>Draft</h2>");

    writer.write_chunk("ignored");
    writer.render_now();
    writer.stop_session();
    assert_eq!(writer.document().text(), "<h2>Draft</h2>");
    assert_eq!(writer.document().revision(), revision);
}

#[test]
fn nested_blockquote_rendered_whole() {
    let mut writer = writer_at(MemoryDocument::new());
    writer.start_session(false);

    writer.write_chunk("<blockquote><p>a</p><blockquote><p>b</p></blockquote>");
    writer.render_now();
    assert_eq!(writer.document().text(), "");

    writer.write_chunk("<p>c</p></blockquote><p>tail");
    writer.render_now();
    assert_eq!(
        writer.document().text(),
        "<blockquote><p>a</p><blockquote><p>b</p></blockquote><p>c</p></blockquote><p>tail</p>"
    );
}

#[test]
fn session_content_lands_between_existing_blocks() {
    let mut document = MemoryDocument::from_markup("<h1>Intro</h1><p>Outro</p>");
    document.set_cursor(14).unwrap();
    let mut writer = writer_at(document);

    writer.start_session(false);
    assert_eq!(writer.session().map(|s| s.anchor()), Some(14));

    for chunk in ["<p>Mid", "dle</p><p", ">Second"] {
        writer.write_chunk(chunk);
        writer.render_now();
        assert!(writer.document().text().starts_with("<h1>Intro</h1>"));
        assert!(writer.document().text().ends_with("<p>Outro</p>"));
    }
    assert_eq!(
        writer.document().text(),
        "<h1>Intro</h1><p>Middle</p><p>Second</p><p>Outro</p>"
    );

    writer.write_chunk(" paragraph</p>");
    writer.stop_session();
    assert_eq!(
        writer.document().text(),
        "<h1>Intro</h1><p>Middle</p><p>Second paragraph</p><p>Outro</p>"
    );
}

#[test]
fn final_render_has_no_provisional_markup() {
    let mut writer = writer_at(MemoryDocument::new());
    writer.start_session(false);
    writer.write_chunk("<p>one</p><p>two <em>unfinished");
    writer.render_now();
    assert_eq!(writer.document().text(), "<p>one</p><p>two <em>unfinished</p>");

    writer.stop_session();
    assert_eq!(writer.document().text(), "<p>one</p>");
}

#[test]
fn stream_cut_mid_tag_finalizes_to_complete_blocks() {
    let mut writer = writer_at(MemoryDocument::from_markup("<h1>Top</h1>"));
    writer.start_session(false);
    writer.write_chunk("<p>one</p><ul><li>A</li><li");
    writer.render_now();
    assert_eq!(writer.document().text(), "<h1>Top</h1><p>one</p>");

    writer.stop_session();
    assert_eq!(writer.document().text(), "<h1>Top</h1><p>one</p>");
}

#[test]
fn verbatim_flush_writes_buffer_as_received() {
    let mut writer = StreamWriter::with_config(
        MemoryDocument::new(),
        WriterConfig {
            min_render_interval: Duration::ZERO,
            final_flush: FinalFlush::Verbatim,
            ..WriterConfig::default()
        },
    );
    writer.start_session(false);
    writer.write_chunk("<p>one</p><p>two <em>unfinished");
    writer.stop_session();
    assert_eq!(writer.document().text(), "<p>one</p><p>two <em>unfinished");
}

#[test]
fn editing_restored_after_session() {
    let mut document = MemoryDocument::new();
    {
        let mut writer = writer_at(&mut document);
        writer.start_session(false);
        writer.write_chunk("<p>x</p>");
        writer.render_now();
        writer.stop_session();
    }
    assert!(document.is_editable());
    assert_eq!(document.cursor_position(), 8);
    document.type_text("!").unwrap();
    assert_eq!(document.text(), "<p>x</p>!");
}

#[test]
fn frames_drive_renders_at_the_configured_rate() {
    let mut writer = StreamWriter::new(MemoryDocument::new());
    let t0 = Instant::now();
    writer.start_session(false);
    writer.write_chunk("<p>");

    let mut rendered = 0;
    for step in 0..20u64 {
        writer.write_chunk("x");
        let now = t0 + Duration::from_millis(step * 10);
        if matches!(writer.on_frame(now), FrameOutcome::Rendered { .. }) {
            rendered += 1;
        }
    }
    // 0..190ms in 10ms steps at a 50ms minimum interval
    assert_eq!(rendered, 4);
    assert_eq!(writer.stats().throttled, 16);

    writer.write_chunk("</p>");
    writer.stop_session();
    assert_eq!(writer.document().text(), format!("<p>{}</p>", "x".repeat(20)));
}
