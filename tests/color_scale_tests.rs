use approx::assert_relative_eq;
use daychart_rs::ChartError;
use daychart_rs::core::{
    CellColorResolver, ColorScale, Colormap, DEFAULT_NO_DATA_COLOR, ScaleOverrides,
    named_colormap, value_extent,
};
use daychart_rs::render::Color;

#[test]
fn positive_data_gets_a_linear_scale_over_its_extent() {
    let values = [7.0, 3.0, 10.0];
    let scale = ColorScale::from_values(values, ScaleOverrides::default()).expect("scale");
    assert_eq!(Some((scale.vmin(), scale.vmax())), value_extent(values));

    let scale = ColorScale::from_values([3.0, 10.0, 7.0], ScaleOverrides::default())
        .expect("scale");
    assert!(!scale.is_diverging());
    assert_eq!(scale.vmin(), 3.0);
    assert_eq!(scale.vmax(), 10.0);
    assert_relative_eq!(scale.normalize(3.0), 0.0);
    assert_relative_eq!(scale.normalize(6.5), 0.5);
    assert_relative_eq!(scale.normalize(10.0), 1.0);
}

#[test]
fn all_zero_data_uses_a_unit_upper_bound() {
    let scale = ColorScale::from_values([0.0, 0.0], ScaleOverrides::default()).expect("scale");
    assert_eq!(scale.vmin(), 0.0);
    assert_eq!(scale.vmax(), 1.0);
    assert!(!scale.is_diverging());
}

#[test]
fn mixed_sign_data_diverges_around_zero() {
    let scale = ColorScale::from_values([-10.0, 0.0, 20.0], ScaleOverrides::default())
        .expect("scale");
    assert_eq!(scale.vcenter(), Some(0.0));
    assert_relative_eq!(scale.normalize(-10.0), 0.0);
    assert_relative_eq!(scale.normalize(-5.0), 0.25);
    assert_relative_eq!(scale.normalize(0.0), 0.5);
    assert_relative_eq!(scale.normalize(10.0), 0.75);
    assert_relative_eq!(scale.normalize(20.0), 1.0);
}

#[test]
fn explicit_center_forces_a_diverging_scale() {
    let overrides = ScaleOverrides {
        vmin: None,
        vmax: None,
        vcenter: Some(4.0),
    };
    let scale = ColorScale::from_values([2.0, 4.0, 12.0], overrides).expect("scale");
    assert!(scale.is_diverging());
    assert_relative_eq!(scale.normalize(3.0), 0.25);
    assert_relative_eq!(scale.normalize(8.0), 0.75);
}

#[test]
fn overrides_replace_data_bounds() {
    let overrides = ScaleOverrides {
        vmin: Some(0.0),
        vmax: Some(200.0),
        vcenter: None,
    };
    let scale = ColorScale::from_values([5.0, 50.0], overrides).expect("scale");
    assert_eq!((scale.vmin(), scale.vmax()), (0.0, 200.0));
    assert_relative_eq!(scale.normalize(50.0), 0.25);
}

#[test]
fn degenerate_linear_span_normalizes_to_zero() {
    let scale = ColorScale::linear(5.0, 5.0).expect("scale");
    assert_eq!(scale.normalize(5.0), 0.0);
}

#[test]
fn invalid_bounds_are_rejected() {
    let err = ColorScale::linear(2.0, 1.0).expect_err("inverted bounds");
    assert!(matches!(err, ChartError::InvalidConfig(_)));

    let err = ColorScale::diverging(0.0, 11.0, 10.0).expect_err("center outside bounds");
    assert!(matches!(err, ChartError::InvalidConfig(_)));

    let err = ColorScale::linear(f64::NEG_INFINITY, 1.0).expect_err("infinite bound");
    assert!(matches!(err, ChartError::InvalidConfig(_)));

    let err = ColorScale::from_values(Vec::<f64>::new(), ScaleOverrides::default())
        .expect_err("no values");
    assert!(matches!(err, ChartError::EmptyInput));

    let err = ColorScale::from_values([1.0, f64::INFINITY], ScaleOverrides::default())
        .expect_err("infinite value");
    assert!(matches!(err, ChartError::InvalidConfig(_)));
}

#[test]
fn zero_gets_the_no_data_color_only_on_linear_scales() {
    let greens = named_colormap("Greens").expect("colormap");

    let linear = ColorScale::linear(0.0, 10.0).expect("scale");
    let resolver = CellColorResolver::new(linear, &greens, None);
    assert!(resolver.is_no_data(0.0));
    assert_eq!(resolver.color(0.0), DEFAULT_NO_DATA_COLOR);
    assert_eq!(resolver.color(0.0).to_hex(), "#e8e8e8");
    assert_eq!(resolver.color(10.0), greens.sample(1.0));

    let custom = Color::parse("#123456").expect("color");
    let resolver = CellColorResolver::new(linear, &greens, Some(custom));
    assert_eq!(resolver.color(0.0), custom);

    let diverging = ColorScale::diverging(-5.0, 0.0, 5.0).expect("scale");
    let resolver = CellColorResolver::new(diverging, &greens, Some(custom));
    assert!(!resolver.is_no_data(0.0));
    assert_eq!(resolver.color(0.0), greens.sample(0.5));
}

#[test]
fn closures_act_as_colormaps() {
    let gray = |t: f64| Color::rgb(t, t, t);
    let scale = ColorScale::linear(0.0, 4.0).expect("scale");
    let resolver = CellColorResolver::new(scale, &gray, None);
    assert_eq!(resolver.color(1.0), Color::rgb(0.25, 0.25, 0.25));
}

#[test]
fn named_colormaps_clamp_and_reverse() {
    let blues = named_colormap("Blues").expect("blues");
    assert_eq!(blues.sample(-1.0).to_hex(), "#f7fbff");
    assert_eq!(blues.sample(2.0).to_hex(), "#08306b");

    let reversed = named_colormap("Blues_r").expect("reversed");
    assert_eq!(reversed.name(), "Blues_r");
    assert_eq!(reversed.sample(0.0).to_hex(), "#08306b");

    let err = named_colormap("Viridian").expect_err("unknown name");
    assert!(matches!(err, ChartError::InvalidColormap(_)));
}
