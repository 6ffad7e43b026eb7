//! Plain-text tables for scenario and comparison results.
//!
//! Runs that never stopped print `-` in place of a stopping time or distance.

use std::fmt::Write;

use brakesim_core::ControllerKind;
use uom::si::{
    f64::{Length, Time},
    length::meter,
    mass::kilogram,
    time::second,
    velocity::kilometer_per_hour,
};

use crate::{ComparisonRow, ScenarioResult};

/// Formats the per-scenario summary for a sweep run with `kind`.
#[must_use]
pub fn summary_table(kind: ControllerKind, results: &[ScenarioResult]) -> String {
    let rows = results
        .iter()
        .map(|result| {
            let scenario = &result.scenario;
            vec![
                scenario.name(),
                format!("{:.0}", scenario.mass.get::<kilogram>() / 1000.0),
                format!("{:.0}", scenario.initial_velocity.get::<kilometer_per_hour>()),
                seconds(result.solution.stopping_time()),
                meters(result.solution.stopping_distance()),
            ]
        })
        .collect::<Vec<_>>();

    let mut out = banner(&format!(
        "SIMULATION SUMMARY: {}",
        kind.as_str().to_uppercase()
    ));
    out.push_str(&table(
        &[
            "scenario",
            "mass (t)",
            "velocity (km/h)",
            "stopping time (s)",
            "stopping distance (m)",
        ],
        &rows,
    ));
    out
}

/// Formats closed-loop vs open-loop stopping distances and times.
#[must_use]
pub fn comparison_table(rows: &[ComparisonRow]) -> String {
    let rows = rows
        .iter()
        .map(|row| {
            vec![
                row.load_condition.clone(),
                meters(row.closed_loop_distance),
                meters(row.open_loop_distance),
                seconds(row.closed_loop_time),
                seconds(row.open_loop_time),
            ]
        })
        .collect::<Vec<_>>();

    let mut out = banner("CLOSED-LOOP VS OPEN-LOOP");
    out.push_str(&table(
        &[
            "load condition",
            "closed-loop distance (m)",
            "open-loop distance (m)",
            "closed-loop time (s)",
            "open-loop time (s)",
        ],
        &rows,
    ));
    out
}

fn seconds(time: Option<Time>) -> String {
    time.map_or_else(|| "-".into(), |t| format!("{:.2}", t.get::<second>()))
}

fn meters(distance: Option<Length>) -> String {
    distance.map_or_else(|| "-".into(), |d| format!("{:.0}", d.get::<meter>()))
}

fn banner(title: &str) -> String {
    let rule = "=".repeat(title.len() + 4);
    format!("{rule}\n  {title}\n{rule}\n")
}

/// Renders a markdown-style table; the first column is left-aligned, the
/// rest right-aligned.
fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    let mut out = String::new();
    let mut line = |cells: &mut dyn Iterator<Item = String>| {
        out.push('|');
        for (i, cell) in cells.enumerate() {
            let width = widths[i];
            // Writing to a String cannot fail.
            let _ = if i == 0 {
                write!(out, " {cell:<width$} |")
            } else {
                write!(out, " {cell:>width$} |")
            };
        }
        out.push('\n');
    };

    line(&mut headers.iter().map(|h| (*h).to_string()));
    line(&mut widths.iter().enumerate().map(|(i, &w)| {
        if i == 0 {
            format!(":{}", "-".repeat(w.saturating_sub(1)))
        } else {
            format!("{}:", "-".repeat(w.saturating_sub(1)))
        }
    }));
    for row in rows {
        line(&mut row.iter().cloned());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use brakesim_simulation::braking;
    use uom::si::f64::{Mass, Velocity};

    use crate::{Execution, Scenario, ScenarioConfig, run_scenarios};

    #[test]
    fn table_aligns_columns() {
        let out = table(
            &["name", "value"],
            &[
                vec!["a".into(), "1".into()],
                vec!["longer".into(), "12345".into()],
            ],
        );

        assert_eq!(
            out,
            "| name   | value |\n\
             | :----- | ----: |\n\
             | a      |     1 |\n\
             | longer | 12345 |\n"
        );
    }

    #[test]
    fn summary_lists_every_scenario() {
        let config = ScenarioConfig {
            masses_kg: vec![450_000.0],
            load_conditions: vec!["0% (empty)".into()],
            initial_velocities_kmh: vec![300.0, 150.0],
            ..ScenarioConfig::default()
        };
        let results = run_scenarios(&config, ControllerKind::OpenLoop, Execution::Sequential)
            .unwrap();

        let out = summary_table(ControllerKind::OpenLoop, &results);

        assert!(out.contains("SIMULATION SUMMARY: OPEN-LOOP"));
        assert!(out.contains("0% (empty), 300 km/h"));
        assert!(out.contains("0% (empty), 150 km/h"));
        let first = &results[0].solution;
        assert!(out.contains(&format!("{:.2}", first.stopping_time().unwrap().get::<second>())));
        assert!(out.contains(&format!("{:.0}", first.stopping_distance().unwrap().get::<meter>())));
        // Banner, header and separator plus one line per scenario.
        assert_eq!(out.lines().count(), 3 + 2 + 2);
    }

    #[test]
    fn unstopped_runs_print_placeholders() {
        let scenario = Scenario {
            load_condition: "full".into(),
            mass: Mass::new::<kilogram>(510_000.0),
            initial_velocity: Velocity::new::<kilometer_per_hour>(300.0),
        };
        let short = braking::Config::new(
            Time::new::<second>(0.01),
            Time::new::<second>(1.0),
            braking::Config::default().stop_threshold(),
        )
        .unwrap();
        let controller = ScenarioConfig::default()
            .controller_config(ControllerKind::OpenLoop)
            .unwrap();
        let solution = scenario.simulate(&controller, &short).unwrap();
        assert_eq!(solution.status, braking::Status::TimedOut);

        let out = summary_table(
            ControllerKind::OpenLoop,
            &[ScenarioResult { scenario, solution }],
        );
        let last = out.lines().last().unwrap();

        assert!(last.starts_with("| full, 300 km/h |"));
        assert!(last.trim_end_matches('|').trim_end().ends_with('-'));
    }

    #[test]
    fn comparison_table_has_one_row_per_load() {
        let rows = vec![
            ComparisonRow {
                load_condition: "empty".into(),
                closed_loop_distance: Some(Length::new::<meter>(3142.95)),
                open_loop_distance: Some(Length::new::<meter>(1923.39)),
                closed_loop_time: Some(Time::new::<second>(195.85)),
                open_loop_time: Some(Time::new::<second>(57.17)),
            },
            ComparisonRow {
                load_condition: "full".into(),
                closed_loop_distance: None,
                open_loop_distance: None,
                closed_loop_time: None,
                open_loop_time: None,
            },
        ];

        let out = comparison_table(&rows);
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines.len(), 3 + 2 + 2);
        assert!(lines[5].contains("3143"));
        assert!(lines[5].contains("1923"));
        assert!(lines[5].contains("195.85"));
        assert!(lines[5].contains("57.17"));
        assert_eq!(lines[6].matches(" - |").count(), 4);
    }
}
