//! regionviz - Survey Data Aggregation & Regional Bar Chart Renderer
//!
//! Aggregates survey measurements (value per city/district, grouped by
//! region) from a CSV file and renders horizontal bar charts through an
//! interactive console menu.

mod charts;
mod config;
mod data;
mod menu;
mod stats;

use anyhow::Context;

use charts::BarChartRenderer;
use config::MacroregionTable;
use data::SurveyData;
use menu::MenuController;

const INPUT_CSV: &str = "data/input_data.csv";
const MACROREGIONS_JSON: &str = "data/macroregions.json";
const RESULTS_DIR: &str = "results";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let data = SurveyData::load_csv(INPUT_CSV)
        .with_context(|| format!("loading survey data from {INPUT_CSV}"))?;
    log::info!(
        "{} unique (region, district) rows across {} regions",
        data.row_count(),
        data.regions().len()
    );

    let macroregions = MacroregionTable::load_or_default(MACROREGIONS_JSON);
    let renderer = BarChartRenderer::new(RESULTS_DIR).context("preparing results directory")?;

    MenuController::new(data, macroregions, renderer).run()
}
