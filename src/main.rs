// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use the_switchyard::backends::local::list_available_classes;
use the_switchyard::config::load_blueprints;
use the_switchyard::{ComponentCatalog, NetworkBuilder};

const DOT_FLAG: &str = "--dot";
const LIST_FLAG: &str = "--list-classes";

fn print_usage(program: &str) {
    eprintln!("Usage: {} <blueprint.yaml> [blueprint2.yaml ...] [{}]", program, DOT_FLAG);
    eprintln!("       {} {}", program, LIST_FLAG);
    eprintln!("Example: {} configs/two-stage-registration.yaml", program);
    eprintln!("Example: {} configs/split/images.yaml configs/split/registration.yaml", program);
    eprintln!("Example: {} configs/source-sink.json {}", program, DOT_FLAG);
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("the-switchyard");

    if args.iter().any(|a| a == LIST_FLAG) {
        println!("🧩 Built-in component classes:");
        for class in list_available_classes() {
            println!("  • {}", class);
        }
        return;
    }

    let dot = args.iter().any(|a| a == DOT_FLAG);
    let files = args
        .iter()
        .skip(1)
        .filter(|a| a.as_str() != DOT_FLAG)
        .cloned()
        .collect::<Vec<_>>();

    if files.is_empty() {
        print_usage(program);
        std::process::exit(1);
    }

    if let Err(e) = run(&files, dot) {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn run(files: &[String], dot: bool) -> Result<()> {
    let start_time = Instant::now();

    let blueprint = load_blueprints(files).context("failed to load blueprint")?;

    if dot {
        print!("{}", blueprint.to_dot());
        return Ok(());
    }

    println!("🚉 Switchyard Component Selection");
    println!("═══════════════════════════════════");
    println!("Blueprint files: {:?}", files);
    println!(
        "📋 {} components, {} connections",
        blueprint.component_count(),
        blueprint.connection_count()
    );

    let catalog = ComponentCatalog::with_defaults();
    println!("📚 Catalog: {} entries", catalog.len());

    let builder = NetworkBuilder::new(&catalog);
    let resolution_start = Instant::now();
    let resolution = builder.resolve(&blueprint)?;
    let resolution_time = resolution_start.elapsed();

    println!("\n🔍 Selected Components:");
    let mut unresolved = 0;
    for node in resolution.node_ids() {
        let tags = resolution.candidate_tags(node);
        match tags.as_slice() {
            [only] => println!("  ✅ {} → {}", resolution.node_name(node), only),
            _ => {
                unresolved += 1;
                println!("  ⚠️  {} → {} candidates:", resolution.node_name(node), tags.len());
                for tag in &tags {
                    println!("        • {}", tag);
                }
            }
        }
    }

    println!("\n🔗 Connections:");
    for edge in resolution.edge_ids() {
        let (from, to) = resolution.endpoints(edge);
        let capabilities = resolution
            .triples(edge)
            .iter()
            .map(|t| t.capability.to_string())
            .collect::<Vec<_>>();
        println!(
            "  {} → {} via {}",
            resolution.node_name(from),
            resolution.node_name(to),
            capabilities.join(", ")
        );
    }
    println!("\n⏱️  Resolution Time: {:?}", resolution_time);

    if unresolved > 0 {
        bail!("{} component(s) are still ambiguous; add criteria to narrow them", unresolved);
    }

    let network = builder.build(&blueprint)?;
    println!("\n🎉 Network built:");
    println!("   Components: {}", network.component_count());
    println!("   Hookups:    {}", network.connection_count());
    println!("   Sinks:      {}", network.sinks().collect::<Vec<_>>().join(", "));
    println!("\n⏱️  Total Time (including blueprint load): {:?}", start_time.elapsed());

    Ok(())
}
