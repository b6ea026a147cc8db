use daychart_rs::api::{CalendarChart, CalendarConfig, LegendLabels};
use daychart_rs::core::{date_inputs, legend_samples};
use daychart_rs::render::{RenderFrame, TextHAlign};
use daychart_rs::{ChartError, Viewport};

fn draw_with(config: CalendarConfig, values: &[f64]) -> (RenderFrame, daychart_rs::CalendarPlot) {
    let dates: Vec<String> = (1..=values.len())
        .map(|day| format!("2024-01-{day:02}"))
        .collect();
    let chart = CalendarChart::new(config).expect("chart");
    let mut frame = RenderFrame::new(Viewport::new(800, 300));
    let plot = chart
        .draw(&mut frame, &date_inputs(&dates), values)
        .expect("draw");
    (frame, plot)
}

#[test]
fn samples_span_both_bounds() {
    let samples = legend_samples(0.0, 100.0, 5).expect("samples");
    assert_eq!(samples, vec![0.0, 25.0, 50.0, 75.0, 100.0]);

    let samples = legend_samples(0.1, 0.7, 7).expect("samples");
    assert_eq!(samples.len(), 7);
    assert_eq!(samples[0], 0.1);
    assert_eq!(samples[6], 0.7);
}

#[test]
fn fewer_than_two_bins_are_rejected() {
    let err = legend_samples(0.0, 1.0, 1).expect_err("one bin");
    assert!(matches!(err, ChartError::InvalidConfig(_)));

    let err = CalendarChart::new(CalendarConfig::default().with_legend(1)).expect_err("config");
    assert!(matches!(err, ChartError::InvalidConfig(_)));
}

#[test]
fn explicit_labels_must_cover_every_bin() {
    let config = CalendarConfig::default().with_legend(3).with_legend_labels(
        Some(LegendLabels::Explicit(vec!["low".to_owned(), "high".to_owned()])),
        None,
    );
    let err = CalendarChart::new(config).expect_err("too few labels");
    assert!(matches!(err, ChartError::InvalidConfig(_)));
}

#[test]
fn legend_draws_one_cell_per_bin_with_edge_labels() {
    let values = [0.0, 30.0, 60.0, 100.0];
    let (frame, plot) = draw_with(CalendarConfig::default().with_legend(4), &values);
    let legend = plot.legend.expect("legend");

    assert_eq!(legend.cells.len(), 4);
    assert_eq!(legend.samples.first().copied(), Some(0.0));
    assert_eq!(legend.samples.last().copied(), Some(100.0));
    assert!(legend.labels.is_empty());
    assert_eq!(frame.cells.len(), plot.cells.len() + 4);

    // Zero on a linear scale is drawn with the no-data fill, like the days.
    assert_eq!(legend.colors[0].to_hex(), "#e8e8e8");
    let legend_cell = frame.cell(legend.cells[3]).expect("legend cell");
    assert_eq!(legend_cell.fill_color, legend.colors[3]);

    let less = frame.texts.iter().find(|t| t.text == "Less").expect("Less");
    let more = frame.texts.iter().find(|t| t.text == "More").expect("More");
    assert_eq!(less.h_align, TextHAlign::Right);
    assert_eq!(more.h_align, TextHAlign::Left);
    assert!(less.x < more.x);
}

#[test]
fn auto_labels_round_samples() {
    let values = [0.0, 50.0, 100.0];
    let config = CalendarConfig::default()
        .with_legend(4)
        .with_legend_labels(Some(LegendLabels::Auto), None);
    let (_, plot) = draw_with(config, &values);
    assert_eq!(plot.legend.expect("legend").labels, ["0", "33", "67", "100"]);

    let config = CalendarConfig::default()
        .with_legend(4)
        .with_legend_labels(Some(LegendLabels::Auto), Some(1));
    let (frame, plot) = draw_with(config, &values);
    assert_eq!(
        plot.legend.expect("legend").labels,
        ["0", "33.3", "66.7", "100"]
    );
    assert!(frame.texts.iter().any(|t| t.text == "66.7"));
}

#[test]
fn explicit_labels_and_missing_edge_labels() {
    let labels = ["none", "some", "lots"].map(str::to_owned).to_vec();
    let config = CalendarConfig::default()
        .with_legend(3)
        .with_legend_labels(Some(LegendLabels::Explicit(labels)), None)
        .with_legend_edge_labels(None);
    let (frame, plot) = draw_with(config, &[1.0, 2.0, 3.0]);

    assert_eq!(plot.legend.expect("legend").labels, ["none", "some", "lots"]);
    assert!(frame.texts.iter().all(|t| t.text != "Less" && t.text != "More"));
    assert!(frame.texts.iter().any(|t| t.text == "lots"));
}

#[test]
fn disabled_legend_draws_nothing_extra() {
    let (frame, plot) = draw_with(CalendarConfig::default(), &[1.0, 2.0]);
    assert!(plot.legend.is_none());
    assert_eq!(frame.cells.len(), 2);
    assert!(frame.texts.iter().all(|t| t.text != "Less"));
}
