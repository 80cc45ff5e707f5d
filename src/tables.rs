use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{
        BatteryBank,
        Summary,
        Trace,
        autonomy::{AutonomyComparison, Rating},
        balance::{EnergyBalance, EnergyTable, Verdict},
        pv::PvArray,
        sizing::BankLayout,
        step::Outcome,
    },
    fmt::FormattedPercentage,
    quantity::{
        Zero,
        energy::{KilowattHours, WattHours},
        power::Kilowatts,
    },
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn energy_cell(energy: WattHours) -> Cell {
    Cell::new(energy).set_alignment(CellAlignment::Right)
}

fn state_of_charge_color(state_of_charge: f64, critical_state_of_charge: f64) -> Color {
    if state_of_charge < critical_state_of_charge {
        Color::Red
    } else if state_of_charge < 0.5 {
        Color::DarkYellow
    } else {
        Color::Green
    }
}

pub fn build_steps_table(trace: &Trace, critical_state_of_charge: f64) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Time",
        "Generation",
        "Consumption",
        "Outcome",
        "SoC",
        "Charged",
        "Discharged",
        "Curtailed",
        "Deficit",
    ]);
    for step in trace.steps() {
        table.add_row(vec![
            Cell::new(step.sample.time.format_time_of_day()).add_attribute(Attribute::Dim),
            Cell::new(step.sample.generation).set_alignment(CellAlignment::Right),
            Cell::new(step.sample.consumption).set_alignment(CellAlignment::Right),
            Cell::new(step.outcome).fg(match step.outcome {
                Outcome::Charged { .. } => Color::Green,
                Outcome::Discharged { .. } => Color::Reset,
                Outcome::CurtailedAtCeiling { .. } => Color::DarkYellow,
                Outcome::DeficitAtFloor { .. } => Color::Red,
            }),
            Cell::new(FormattedPercentage(step.state_of_charge_after))
                .set_alignment(CellAlignment::Right)
                .fg(state_of_charge_color(step.state_of_charge_after, critical_state_of_charge)),
            energy_cell(step.outcome.charged()),
            energy_cell(step.outcome.discharged()),
            energy_cell(step.outcome.curtailed()).add_attribute(Attribute::Dim),
            energy_cell(step.outcome.deficit()).fg(if step.outcome.deficit() > WattHours::ZERO {
                Color::Red
            } else {
                Color::Reset
            }),
        ]);
    }
    table
}

pub fn build_summary_table(bank: &BatteryBank, summary: &Summary) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Metric", "Value"]);
    let critical = summary.critical_state_of_charge;
    let rows = [
        ("Capacity", Cell::new(KilowattHours::from(bank.capacity()))),
        ("Usable capacity", Cell::new(KilowattHours::from(bank.usable_capacity()))),
        ("Depth of discharge", Cell::new(FormattedPercentage(bank.depth_of_discharge()))),
        ("Round-trip efficiency", Cell::new(FormattedPercentage(bank.round_trip_efficiency()))),
        (
            "Minimum SoC",
            Cell::new(FormattedPercentage(summary.min_state_of_charge))
                .fg(state_of_charge_color(summary.min_state_of_charge, critical)),
        ),
        ("Maximum SoC", Cell::new(FormattedPercentage(summary.max_state_of_charge))),
        ("Mean SoC", Cell::new(FormattedPercentage(summary.mean_state_of_charge))),
        (
            "Critical steps",
            Cell::new(summary.n_critical_steps).fg(if summary.n_critical_steps == 0 {
                Color::Green
            } else {
                Color::Red
            }),
        ),
        ("Charged", Cell::new(KilowattHours::from(summary.charged))),
        ("Discharged", Cell::new(KilowattHours::from(summary.discharged))),
        ("Curtailed", Cell::new(KilowattHours::from(summary.curtailed))),
        ("Deficit", Cell::new(KilowattHours::from(summary.deficit))),
        (
            "Unmet load",
            Cell::new(KilowattHours::from(summary.unmet_load)).fg(
                if summary.unmet_load > WattHours::ZERO { Color::Red } else { Color::Green },
            ),
        ),
        ("System efficiency", Cell::new(FormattedPercentage(summary.system_efficiency))),
    ];
    for (name, value) in rows {
        table.add_row(vec![Cell::new(name), value.set_alignment(CellAlignment::Right)]);
    }
    table
}

pub fn build_energy_table(energy_table: &EnergyTable) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Period",
        "Consumption",
        "Consumed",
        "Generation",
        "Generated",
        "Balance",
        "Σ Consumed",
        "Σ Generated",
        "Σ Balance",
    ]);
    let balance_color =
        |balance: WattHours| if balance >= WattHours::ZERO { Color::Green } else { Color::Red };
    let kilowatt_hours = |energy: WattHours| {
        Cell::new(KilowattHours::from(energy)).set_alignment(CellAlignment::Right)
    };
    for row in &energy_table.rows {
        table.add_row(vec![
            Cell::new(row.time.format_time_of_day()),
            Cell::new(row.consumption).set_alignment(CellAlignment::Right),
            kilowatt_hours(row.consumed),
            Cell::new(row.generation).set_alignment(CellAlignment::Right),
            kilowatt_hours(row.generated),
            kilowatt_hours(row.balance).fg(balance_color(row.balance)),
            kilowatt_hours(row.cumulative_consumed).add_attribute(Attribute::Dim),
            kilowatt_hours(row.cumulative_generated).add_attribute(Attribute::Dim),
            kilowatt_hours(row.cumulative_balance).fg(balance_color(row.cumulative_balance)),
        ]);
    }
    let total_balance = energy_table.total_balance();
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(""),
        kilowatt_hours(energy_table.total_consumed).add_attribute(Attribute::Bold),
        Cell::new(""),
        kilowatt_hours(energy_table.total_generated).add_attribute(Attribute::Bold),
        kilowatt_hours(total_balance)
            .add_attribute(Attribute::Bold)
            .fg(balance_color(total_balance)),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
    ]);
    table
}

pub fn build_layout_table(layout: &BankLayout) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Parameter", "Value"]);
    let rows = [
        ("Required charge", Cell::new(layout.required_charge)),
        ("Battery", Cell::new(format!("{} × {}", layout.battery_voltage, layout.battery_charge))),
        ("In series", Cell::new(layout.n_series)),
        ("In parallel", Cell::new(layout.n_parallel)),
        ("Batteries", Cell::new(layout.n_batteries).add_attribute(Attribute::Bold)),
        ("Installed capacity", Cell::new(KilowattHours::from(layout.installed_capacity))),
    ];
    for (name, value) in rows {
        table.add_row(vec![Cell::new(name), value.set_alignment(CellAlignment::Right)]);
    }
    table
}

pub fn build_autonomy_table(comparison: &AutonomyComparison) -> Table {
    let scenario_names: Vec<&str> = comparison
        .rows
        .first()
        .map(|row| row.outcomes.iter().map(|outcome| outcome.name.as_str()).collect())
        .unwrap_or_default();

    let mut table = new_table();
    let mut header = vec![
        "Days".to_string(),
        "Batteries".to_string(),
        "Capacity".to_string(),
    ];
    for name in &scenario_names {
        header.push(format!("{name} min SoC"));
        header.push(format!("{name} critical"));
    }
    header.push("Rating".to_string());
    table.set_header(header);

    let recommended_days = comparison.recommendation().map(|row| row.autonomy_days);
    for row in &comparison.rows {
        let is_recommended = Some(row.autonomy_days) == recommended_days;
        let mut cells = vec![
            Cell::new(row.autonomy_days).add_attribute(if is_recommended {
                Attribute::Bold
            } else {
                Attribute::NormalIntensity
            }),
            Cell::new(row.layout.n_batteries).set_alignment(CellAlignment::Right),
            Cell::new(KilowattHours::from(row.layout.installed_capacity))
                .set_alignment(CellAlignment::Right),
        ];
        for outcome in &row.outcomes {
            cells.push(
                Cell::new(FormattedPercentage(outcome.summary.min_state_of_charge))
                    .set_alignment(CellAlignment::Right),
            );
            cells.push(
                Cell::new(outcome.summary.n_critical_steps).set_alignment(CellAlignment::Right),
            );
        }
        cells.push(Cell::new(row.rating).fg(match row.rating {
            Rating::Excellent => Color::Green,
            Rating::Good => Color::DarkGreen,
            Rating::Acceptable => Color::DarkYellow,
            Rating::Insufficient => Color::Red,
        }));
        table.add_row(cells);
    }
    table
}

pub fn build_balance_table(balance: &EnergyBalance) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Metric", "Value"]);
    let rows = [
        ("Generation", Cell::new(KilowattHours::from(balance.generation))),
        ("Consumption", Cell::new(KilowattHours::from(balance.consumption))),
        ("Surplus", Cell::new(KilowattHours::from(balance.surplus)).fg(Color::Green)),
        ("Deficit", Cell::new(KilowattHours::from(balance.deficit)).fg(Color::Red)),
        ("Net", Cell::new(KilowattHours::from(balance.net()))),
        ("Self-sufficiency", Cell::new(FormattedPercentage(balance.self_sufficiency))),
        (
            "Verdict",
            Cell::new(balance.verdict()).fg(match balance.verdict() {
                Verdict::Oversized => Color::Green,
                Verdict::Undersized => Color::Red,
                Verdict::Balanced => Color::Reset,
            }),
        ),
    ];
    for (name, value) in rows {
        table.add_row(vec![Cell::new(name), value.set_alignment(CellAlignment::Right)]);
    }
    table
}

pub fn build_array_table(array: &PvArray) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Parameter", "Value"]);
    table.add_row(vec![
        Cell::new("Peak power"),
        Cell::new(Kilowatts::from(array.peak_power())).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Modules"),
        Cell::new(format!("{:.1}", array.n_modules())).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Area"),
        Cell::new(array.total_area()).set_alignment(CellAlignment::Right),
    ]);
    table
}
