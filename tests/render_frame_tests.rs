use daychart_rs::render::{
    CellPrimitive, CellShape, Color, LinePrimitive, NullRenderer, RenderFrame, Renderer,
    TextHAlign, TextPrimitive,
};
use daychart_rs::{ChartError, Viewport};

fn populated_frame() -> RenderFrame {
    let mut frame = RenderFrame::new(Viewport::new(200, 100));
    frame.push_cell(CellPrimitive::new(10.0, 10.0, 8.0, 8.0, Color::BLACK));
    frame.push_line(LinePrimitive::new(0.0, 0.0, 50.0, 0.0, 1.0, Color::BLACK));
    frame.push_text(TextPrimitive::new(
        "Jan",
        20.0,
        5.0,
        10.0,
        Color::BLACK,
        TextHAlign::Center,
    ));
    frame
}

#[test]
fn null_renderer_counts_valid_primitives() {
    let frame = populated_frame();
    let mut renderer = NullRenderer::default();
    renderer.render(&frame).expect("valid frame");

    assert_eq!(renderer.last_cell_count, 1);
    assert_eq!(renderer.last_line_count, 1);
    assert_eq!(renderer.last_text_count, 1);
}

#[test]
fn null_renderer_rejects_invalid_primitives() {
    let mut renderer = NullRenderer::default();

    let mut frame = populated_frame();
    frame.push_line(LinePrimitive::new(0.0, 0.0, 1.0, 1.0, 0.0, Color::BLACK));
    let err = renderer.render(&frame).expect_err("zero-width line");
    assert!(matches!(err, ChartError::InvalidData(_)));

    let mut frame = populated_frame();
    let mut cell = CellPrimitive::new(0.0, 0.0, 8.0, 8.0, Color::WHITE);
    cell.shape = CellShape::Rounded { radius_ratio: 0.9 };
    frame.push_cell(cell);
    let err = renderer.render(&frame).expect_err("ratio out of range");
    assert!(matches!(err, ChartError::InvalidData(_)));

    let mut frame = populated_frame();
    frame.push_text(TextPrimitive::new("", 0.0, 0.0, 10.0, Color::BLACK, TextHAlign::Left));
    let err = renderer.render(&frame).expect_err("empty text");
    assert!(matches!(err, ChartError::InvalidData(_)));

    let frame = RenderFrame::new(Viewport::new(0, 100));
    let err = renderer.render(&frame).expect_err("empty viewport");
    assert!(matches!(
        err,
        ChartError::InvalidViewport {
            width: 0,
            height: 100
        }
    ));
}

#[test]
fn cell_handles_index_pushed_cells() {
    let mut frame = RenderFrame::new(Viewport::new(50, 50));
    assert!(frame.is_empty());
    let first = frame.push_cell(CellPrimitive::new(0.0, 0.0, 4.0, 4.0, Color::BLACK));
    let second = frame.push_cell(CellPrimitive::new(5.0, 0.0, 4.0, 4.0, Color::WHITE));

    assert_eq!((first.index(), second.index()), (0, 1));
    assert_eq!(frame.cell(second).expect("second").fill_color, Color::WHITE);
    assert_eq!(frame.cell(first).expect("first").center(), (2.0, 2.0));
    assert!(!frame.is_empty());
}
