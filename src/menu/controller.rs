//! Menu Controller Module
//! Interactive read-eval loop dispatching aggregation and rendering.

use anyhow::Result;
use std::io::{self, Write};

use crate::charts::{BarChartRenderer, ChartSpec};
use crate::config::MacroregionTable;
use crate::data::SurveyData;
use crate::stats::Aggregator;

/// Drives the console menu over the loaded survey table.
pub struct MenuController {
    data: SurveyData,
    macroregions: MacroregionTable,
    renderer: BarChartRenderer,
}

impl MenuController {
    pub fn new(
        data: SurveyData,
        macroregions: MacroregionTable,
        renderer: BarChartRenderer,
    ) -> Self {
        Self {
            data,
            macroregions,
            renderer,
        }
    }

    /// Loop until the user exits. Invalid top-level commands re-prompt;
    /// render and aggregation failures propagate.
    pub fn run(&self) -> Result<()> {
        loop {
            println!();
            println!("Select chart type:");
            println!("1. By region");
            println!("2. By macroregion");
            println!("3. Compare all regions");
            println!("0. Exit");

            match read_line("\nYour choice: ")?.as_str() {
                "1" => self.region_chart()?,
                "2" => self.macroregion_chart()?,
                "3" => self.all_regions_chart()?,
                "0" => {
                    println!("Exiting the application.");
                    return Ok(());
                }
                _ => println!("Invalid command, please try again."),
            }
        }
    }

    /// District values within a selected region.
    fn region_chart(&self) -> Result<()> {
        let regions = self.data.regions();
        println!("\nSelect a region:");
        for (i, region) in regions.iter().enumerate() {
            println!("{}. {}", i + 1, region);
        }

        let choice = read_line("\nEnter region number: ")?;
        let Some(idx) = parse_selection(&choice, regions.len()) else {
            println!("Invalid selection!");
            return Ok(());
        };
        let region = &regions[idx];

        let entries = Aggregator::districts_in_region(&self.data, region)?;
        let spec = ChartSpec {
            file_stem: "region_chart",
            title: format!("Value distribution by districts: {region}"),
            x_label: "Value",
            show_mean: true,
        };
        self.renderer.render(&spec, &entries)?;
        Ok(())
    }

    /// Average values per region within a selected macroregion.
    fn macroregion_chart(&self) -> Result<()> {
        println!("\nSelect a macroregion:");
        for (i, mac) in self.macroregions.iter().enumerate() {
            println!("{}. {}", i + 1, mac.name);
        }

        let choice = read_line("\nEnter macroregion number: ")?;
        let Some(idx) = parse_selection(&choice, self.macroregions.len()) else {
            println!("Invalid selection!");
            return Ok(());
        };
        // parse_selection bounds the index
        let mac = self.macroregions.get(idx).expect("validated index");

        let entries = Aggregator::regions_in_macroregion(&self.data, mac)?;
        let spec = ChartSpec {
            file_stem: "macroregion_chart",
            title: format!("Average values by regions in macroregion: {}", mac.name),
            x_label: "Average Value",
            show_mean: true,
        };
        self.renderer.render(&spec, &entries)?;
        Ok(())
    }

    /// Average values across all regions.
    fn all_regions_chart(&self) -> Result<()> {
        let entries = Aggregator::all_regions(&self.data)?;
        let spec = ChartSpec {
            file_stem: "country_chart",
            title: "Comparison of average values across all regions".to_string(),
            x_label: "Average Value",
            show_mean: true,
        };
        self.renderer.render(&spec, &entries)?;
        Ok(())
    }
}

/// Print a prompt and read one trimmed line from stdin.
fn read_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf.trim().to_string())
}

/// Resolve a 1-based menu selection against a list of `len` items.
pub(crate) fn parse_selection(input: &str, len: usize) -> Option<usize> {
    let n: usize = input.trim().parse().ok()?;
    if (1..=len).contains(&n) {
        Some(n - 1)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_selection_is_zero_based() {
        assert_eq!(parse_selection("1", 3), Some(0));
        assert_eq!(parse_selection("3", 3), Some(2));
        assert_eq!(parse_selection("  2 ", 3), Some(1));
    }

    #[test]
    fn out_of_range_selection_is_rejected() {
        assert_eq!(parse_selection("0", 3), None);
        assert_eq!(parse_selection("4", 3), None);
        assert_eq!(parse_selection("-1", 3), None);
        assert_eq!(parse_selection("1", 0), None);
    }

    #[test]
    fn malformed_selection_is_rejected() {
        assert_eq!(parse_selection("", 3), None);
        assert_eq!(parse_selection("two", 3), None);
        assert_eq!(parse_selection("1.5", 3), None);
    }
}
