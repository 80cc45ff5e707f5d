use plotters::prelude::*;

use crate::{core::Trace, prelude::*};

const GENERATION_COLOR: RGBColor = RGBColor(46, 125, 50);
const CONSUMPTION_COLOR: RGBColor = RGBColor(198, 40, 40);
const STATE_OF_CHARGE_COLOR: RGBColor = RGBColor(106, 27, 154);
const CRITICAL_COLOR: RGBColor = RGBColor(239, 108, 0);

/// Cycled through by the overlay, one per scenario.
const SCENARIO_COLORS: [RGBColor; 6] = [
    RGBColor(21, 101, 192),
    RGBColor(198, 40, 40),
    RGBColor(46, 125, 50),
    RGBColor(239, 108, 0),
    RGBColor(106, 27, 154),
    RGBColor(0, 131, 143),
];

/// Render the trace as an SVG: power on the upper panel, state of charge on the lower one.
pub fn render_svg(
    trace: &Trace,
    title: &str,
    critical_state_of_charge: f64,
    (width, height): (u32, u32),
) -> Result<String> {
    let steps = trace.steps();
    let (Some(first), Some(last)) = (steps.first(), steps.last()) else {
        bail!("nothing to plot");
    };
    let start = first.sample.time.0;
    let end = last.sample.time.0 + trace.time_step().0;
    let max_power = steps
        .iter()
        .map(|step| step.sample.generation.max(step.sample.consumption).0)
        .fold(0.0, f64::max)
        .max(1.0)
        * 1.1;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;
        let root = root.titled(title, ("sans-serif", 20))?;
        let panels = root.split_evenly((2, 1));

        let mut power_chart = ChartBuilder::on(&panels[0])
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(60)
            .build_cartesian_2d(start..end, 0.0..max_power)?;
        power_chart.configure_mesh().y_desc("Power (W)").x_labels(12).draw()?;
        power_chart
            .draw_series(LineSeries::new(
                steps.iter().map(|step| (step.sample.time.0, step.sample.generation.0)),
                GENERATION_COLOR.stroke_width(2),
            ))?
            .label("Generation")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GENERATION_COLOR));
        power_chart
            .draw_series(LineSeries::new(
                steps.iter().map(|step| (step.sample.time.0, step.sample.consumption.0)),
                CONSUMPTION_COLOR.stroke_width(2),
            ))?
            .label("Consumption")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], CONSUMPTION_COLOR));
        power_chart.configure_series_labels().border_style(BLACK).background_style(WHITE).draw()?;

        let mut state_of_charge_chart = ChartBuilder::on(&panels[1])
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(60)
            .build_cartesian_2d(start..end, 0.0..100.0)?;
        state_of_charge_chart
            .configure_mesh()
            .x_desc("Hour")
            .y_desc("SoC (%)")
            .x_labels(12)
            .draw()?;

        let bank = trace.bank();
        for (level, color) in [
            (bank.min_state_of_charge(), CONSUMPTION_COLOR),
            (critical_state_of_charge, CRITICAL_COLOR),
            (bank.max_state_of_charge(), GENERATION_COLOR),
        ] {
            state_of_charge_chart.draw_series(LineSeries::new(
                [(start, level * 100.0), (end, level * 100.0)],
                color.mix(0.6),
            ))?;
        }
        state_of_charge_chart
            .draw_series(LineSeries::new(
                steps.iter().map(|step| (step.sample.time.0, step.state_of_charge_after * 100.0)),
                STATE_OF_CHARGE_COLOR.stroke_width(2),
            ))?
            .label("SoC")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], STATE_OF_CHARGE_COLOR));
        state_of_charge_chart
            .configure_series_labels()
            .border_style(BLACK)
            .background_style(WHITE)
            .draw()?;

        root.present()?;
    }
    Ok(svg)
}

/// Overlay the state of charge of several named traces, typically the seasonal scenarios run
/// against the same bank.
///
/// The floor and ceiling lines come from the first trace's bank.
pub fn render_overlay_svg(
    traces: &[(&str, &Trace)],
    title: &str,
    critical_state_of_charge: f64,
    (width, height): (u32, u32),
) -> Result<String> {
    let Some((_, first)) = traces.first() else {
        bail!("nothing to plot");
    };
    let (start, end) = traces
        .iter()
        .filter_map(|(_, trace)| {
            let steps = trace.steps();
            Some((
                steps.first()?.sample.time.0,
                steps.last()?.sample.time.0 + trace.time_step().0,
            ))
        })
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(start, end), (first, last)| {
            (start.min(first), end.max(last))
        });
    ensure!(start < end, "nothing to plot");

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;
        let root = root.titled(title, ("sans-serif", 20))?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(60)
            .build_cartesian_2d(start..end, 0.0..100.0)?;
        chart.configure_mesh().x_desc("Hour").y_desc("SoC (%)").x_labels(12).draw()?;

        let bank = first.bank();
        for (level, color) in [
            (bank.min_state_of_charge(), CONSUMPTION_COLOR),
            (critical_state_of_charge, CRITICAL_COLOR),
            (bank.max_state_of_charge(), GENERATION_COLOR),
        ] {
            chart.draw_series(LineSeries::new(
                [(start, level * 100.0), (end, level * 100.0)],
                color.mix(0.6),
            ))?;
        }

        for ((name, trace), color) in traces.iter().zip(SCENARIO_COLORS.into_iter().cycle()) {
            chart
                .draw_series(LineSeries::new(
                    trace
                        .steps()
                        .iter()
                        .map(|step| (step.sample.time.0, step.state_of_charge_after * 100.0)),
                    color.stroke_width(2),
                ))?
                .label(*name)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }
        chart.configure_series_labels().border_style(BLACK).background_style(WHITE).draw()?;

        root.present()?;
    }
    Ok(svg)
}
