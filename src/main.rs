use std::str::FromStr;
use std::time::Duration;

use clap::{value_t, App, Arg};
use tracing_subscriber::EnvFilter;

use graphsearch::{Algorithm, Graph, NodeId, Point};
use pathbench::{average, suboptimality, Runner, RunnerConfig};

type Error = anyhow::Error;

fn main() -> () {
    match driver() {
        Ok(_) => {}
        Err(e) => eprintln!("{}", e),
    }
}

fn driver() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = App::new("pathbench")
        .version("1.0")
        .author("Alex Rudy <opensource@alexrudy.net>")
        .about("Benchmark shortest-path searches on a synthetic road grid")
        .arg(
            Arg::with_name("grid")
                .long("grid")
                .value_name("N")
                .default_value("40")
                .help("Side length of the grid graph"),
        )
        .arg(
            Arg::with_name("algorithms")
                .long("algorithms")
                .value_name("LIST")
                .default_value("BFS,DIJKSTRA,ASTAR")
                .help("Comma-separated algorithm identifiers to compare"),
        )
        .arg(
            Arg::with_name("sizes")
                .long("sizes")
                .value_name("LIST")
                .takes_value(true)
                .help("Comma-separated sub-graph sizes for a scalability sweep"),
        )
        .arg(
            Arg::with_name("interval")
                .long("interval-ms")
                .value_name("MS")
                .default_value("100")
                .help("Memory sampling interval in milliseconds"),
        )
        .arg(
            Arg::with_name("timeout")
                .long("timeout-s")
                .value_name("S")
                .default_value("60")
                .help("Per-run timeout in seconds"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .value_name("SEED")
                .takes_value(true)
                .help("Seed for endpoint selection in the scalability sweep"),
        )
        .get_matches();

    let side = value_t!(matches, "grid", usize)?;
    let interval = value_t!(matches, "interval", u64)?;
    let timeout = value_t!(matches, "timeout", u64)?;
    let seed = match matches.value_of("seed") {
        Some(_) => Some(value_t!(matches, "seed", u64)?),
        None => None,
    };

    let algorithms: Vec<String> = matches
        .value_of("algorithms")
        .unwrap_or("")
        .split(',')
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();

    let graph = grid_graph(side);
    let source = NodeId(0);
    let target = NodeId((side * side - 1) as u64);

    let config = RunnerConfig {
        sample_interval: Duration::from_millis(interval),
        timeout: Duration::from_secs(timeout),
        seed,
    };
    let mut runner = Runner::new(config);

    println!(
        "Comparing on a {side}x{side} grid ({nodes} nodes, {edges} edges), corner to corner",
        side = side,
        nodes = graph.node_count(),
        edges = graph.edge_count()
    );

    let records = runner.run_comparison(&graph, source, target, &algorithms);

    let optimal = records
        .iter()
        .find(|record| record.algorithm == Algorithm::Dijkstra.name())
        .map(|record| record.path_distance);

    println!(
        "{:<10} {:>10} {:>10} {:>10} {:>10} {:>12} {:>10}",
        "algorithm", "time (s)", "mem (MB)", "expanded", "visited", "distance", "subopt (%)"
    );
    for record in &records {
        match &record.error {
            Some(error) => println!("{:<10} failed: {}", record.algorithm, error),
            None => println!(
                "{:<10} {:>10.4} {:>10.2} {:>10} {:>10} {:>12.2} {:>10.2}",
                record.algorithm,
                record.cpu_time,
                record.memory_mb,
                record.nodes_expanded,
                record.visited_nodes,
                record.path_distance,
                optimal
                    .map(|distance| suboptimality(distance, record.path_distance))
                    .unwrap_or(0.0),
            ),
        }
    }

    if let Ok(summary) = average(&records) {
        println!(
            "mean: time {:.4} s, memory {:.2} MB, {:.0} expansions, success rate {:.0}%",
            summary.cpu_time,
            summary.memory_mb,
            summary.nodes_expanded,
            summary.success_rate * 100.0
        );
    }

    if let Some(list) = matches.value_of("sizes") {
        let sizes = parse_sizes(list)?;
        for name in &algorithms {
            let algorithm = match Algorithm::from_str(name) {
                Ok(algorithm) => algorithm,
                Err(_) => continue,
            };

            println!("\nScalability sweep for {}:", algorithm);
            println!(
                "{:>8} {:>10} {:>10} {:>10} {:>12}",
                "size", "time (s)", "mem (MB)", "expanded", "distance"
            );
            for sample in runner.run_scalability(&graph, &sizes, algorithm) {
                match &sample.record.error {
                    Some(error) => println!("{:>8} failed: {}", sample.graph_size, error),
                    None => println!(
                        "{:>8} {:>10.4} {:>10.2} {:>10} {:>12.2}",
                        sample.graph_size,
                        sample.record.cpu_time,
                        sample.record.memory_mb,
                        sample.record.nodes_expanded,
                        sample.record.path_distance,
                    ),
                }
            }
        }
    }

    Ok(())
}

fn parse_sizes(list: &str) -> Result<Vec<usize>, Error> {
    list.split(',')
        .map(|size| size.trim().parse::<usize>().map_err(Error::from))
        .collect()
}

/// Square grid with unit-weight streets and planar node positions, a small
/// stand-in for the road networks the harness is meant to measure.
fn grid_graph(side: usize) -> Graph {
    let mut graph = Graph::new();
    let id = |x: usize, y: usize| NodeId((y * side + x) as u64);

    for y in 0..side {
        for x in 0..side {
            let node = id(x, y);
            graph.set_position(node, Point::new(x as f64, y as f64));
            if x + 1 < side {
                graph.add_edge(node, id(x + 1, y), Some(1.0));
            }
            if y + 1 < side {
                graph.add_edge(node, id(x, y + 1), Some(1.0));
            }
        }
    }

    graph
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn grid_graphs_are_fully_placed_and_connected() {
        let graph = grid_graph(4);
        assert_eq!(graph.node_count(), 16);
        assert_eq!(graph.edge_count(), 24);
        for node in graph.nodes() {
            assert!(graph.position(node).is_some());
        }
    }

    #[test]
    fn sizes_parse_as_a_comma_list() {
        assert_eq!(parse_sizes("10, 20,30").unwrap(), vec![10, 20, 30]);
        assert!(parse_sizes("10,oops").is_err());
    }
}
