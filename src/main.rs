use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use itertools::Itertools;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use purchase_tour::algorithms::astar::LogProgress;
use purchase_tour::algorithms::{PriceDistanceHeuristic, TourHeuristic, ZeroHeuristic};
use purchase_tour::utils::loader::{load_offers, load_requirement, load_travel_network};
use purchase_tour::{
    build_market_graph, optimize_purchase_with, BestPriceIndex, Location, SearchConfig,
    SweatLevel, TourProblem,
};

#[derive(Clone, Parser)]
#[command(version, about = "Plot routes through the travel network to buy materials", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum HeuristicKind {
    /// exhaustive best-first search, always optimal
    #[default]
    Zero,
    /// cheapest prices plus distance to the end, unverified
    PriceDistance,
}

#[derive(Clone, Subcommand)]
enum Commands {
    /// plans the cheapest purchase tour for a shopping list
    Plan {
        #[arg(long, env("PURCHASE_TOUR_NETWORK"))]
        network: PathBuf,
        #[arg(long, env("PURCHASE_TOUR_OFFERS"))]
        offers: PathBuf,
        /// start location as `area:node`
        #[arg(short, long, env("PURCHASE_TOUR_START"))]
        start: Location,
        /// end location as `area:node`, defaults to the start
        #[arg(short, long)]
        end: Option<Location>,
        #[arg(short = 'w', long, value_enum, default_value_t = SweatLevel::Normal)]
        sweat_level: SweatLevel,
        /// overrides the sweat level
        #[arg(long, alias = "opp-cost")]
        opportunity_cost_per_second: Option<f64>,
        #[arg(long, value_enum, default_value_t = HeuristicKind::Zero)]
        heuristic: HeuristicKind,
        /// print the plan as json
        #[arg(long)]
        json: bool,
        /// shopping list, one `<quantity> <item-id>` per line
        list: PathBuf,
    },
    /// lists the cheapest offer per location for each item on a shopping list
    Offers {
        #[arg(long, env("PURCHASE_TOUR_OFFERS"))]
        offers: PathBuf,
        list: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let args = Cli::parse();

    match args.command {
        Commands::Plan {
            network,
            offers,
            start,
            end,
            sweat_level,
            opportunity_cost_per_second,
            heuristic,
            json,
            list,
        } => {
            let end = end.unwrap_or(start);
            let mut config = SearchConfig::with_sweat_level(sweat_level);
            if let Some(cost_per_second) = opportunity_cost_per_second {
                config = config.with_cost_per_second(cost_per_second);
            }

            let requirement = load_requirement(&list)
                .with_context(|| format!("reading shopping list {}", list.display()))?;
            let offers = load_offers(&offers, Some(&requirement))
                .with_context(|| format!("reading offers {}", offers.display()))?;
            let network = load_travel_network(&network)
                .with_context(|| format!("reading travel network {}", network.display()))?;

            let prices = BestPriceIndex::from_offers(offers);
            let relevant = prices
                .locations()
                .copied()
                .chain([start, end])
                .collect_vec();
            let graph = build_market_graph(&network, relevant, &config)
                .context("building market graph")?;
            info!(
                markets = graph.node_count(),
                edges = graph.edge_count(),
                "market graph ready"
            );

            let heuristic: Box<dyn TourHeuristic> = match heuristic {
                HeuristicKind::Zero => Box::new(ZeroHeuristic),
                HeuristicKind::PriceDistance => Box::new(PriceDistanceHeuristic::new(
                    &prices,
                    &graph,
                    &requirement,
                    end,
                    config.cost_per_second,
                )),
            };

            let problem = TourProblem::new(&prices, &graph, config.cost_per_second);
            let plan = optimize_purchase_with(
                &problem,
                &requirement,
                start,
                end,
                heuristic.as_ref(),
                &mut LogProgress::default(),
            )
            .context("planning purchase tour")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                println!();
                println!("purchase cost: {:.2}", plan.purchase_cost());
                println!("travel cost: {:.2}", plan.travel_cost());
                println!("total cost: {:.2}", plan.total_cost);
                println!();
                for transition in &plan.transitions {
                    println!("{}", transition);
                }
            }
        }
        Commands::Offers { offers, list } => {
            let requirement = load_requirement(&list)
                .with_context(|| format!("reading shopping list {}", list.display()))?;
            let offers = load_offers(&offers, Some(&requirement))
                .with_context(|| format!("reading offers {}", offers.display()))?;
            let prices = BestPriceIndex::from_offers(offers);

            for (quantity, item) in requirement.iter() {
                println!("item {} (need {}):", item, quantity);
                let ranked = prices
                    .offers_for(item)
                    .sorted_by(|a, b| a.unit_price.total_cmp(&b.unit_price));
                for offer in ranked {
                    let marker = if offer.covers(quantity) { "" } else { " (short)" };
                    println!(
                        "  {} at {:.2}, {} available{}",
                        offer.location, offer.unit_price, offer.quantity_available, marker
                    );
                }
            }
        }
    }

    Ok(())
}
