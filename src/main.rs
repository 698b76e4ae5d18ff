use std::process;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use bintree::{BinaryTree, Bst, SplayOptions, SplayTree, Traversal};

/// Format a sequence of values as a space-separated list.
fn join(values: &[i64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn fmt_opt(v: Option<&i64>) -> String {
    v.map_or_else(|| "undefined".to_string(), |v| v.to_string())
}

// ── tree dispatch ────────────────────────────────────────────────────────

enum AnyTree {
    Bst(Bst<i64>),
    Splay(SplayTree<i64>),
}

impl AnyTree {
    fn build(kind: KindArg, splay_on_insert: bool, values: &[i64]) -> Self {
        match kind {
            KindArg::Bst => AnyTree::Bst(values.iter().copied().collect()),
            KindArg::Splay => {
                let mut tree = SplayTree::with_options(SplayOptions { splay_on_insert });
                tree.extend(values.iter().copied());
                AnyTree::Splay(tree)
            }
        }
    }

    fn search(&mut self, key: i64) -> bool {
        match self {
            AnyTree::Bst(t) => t.search(&key),
            AnyTree::Splay(t) => t.search(&key),
        }
    }

    fn delete(&mut self, key: i64) -> Option<i64> {
        match self {
            AnyTree::Bst(t) => t.delete(&key),
            AnyTree::Splay(t) => t.delete(&key),
        }
    }

    fn len(&self) -> usize {
        match self {
            AnyTree::Bst(t) => t.len(),
            AnyTree::Splay(t) => t.len(),
        }
    }

    fn root(&self) -> Option<&i64> {
        match self {
            AnyTree::Bst(t) => t.root(),
            AnyTree::Splay(t) => t.root(),
        }
    }

    fn traversal(&self, order: Traversal) -> Vec<i64> {
        match self {
            AnyTree::Bst(t) => t.values(order),
            AnyTree::Splay(t) => t.values(order),
        }
    }

    fn successor(&self, key: i64) -> Option<i64> {
        match self {
            AnyTree::Bst(t) => t.in_order_successor(&key).copied(),
            AnyTree::Splay(t) => t.in_order_successor(&key).copied(),
        }
    }
}

fn print_info<B: BinaryTree<Value = i64>>(tree: &B) {
    let summary = tree.summary();
    println!("Nodes:        {}", summary.node_count);
    println!(
        "Height:       {} (recursive {})",
        summary.height,
        tree.height_recursive()
    );
    println!("Min:          {}", fmt_opt(summary.min));
    println!("Max:          {}", fmt_opt(summary.max));
    println!("Root:         {}", fmt_opt(tree.root()));
    for order in Traversal::ALL {
        println!("{:<13} {}", format!("{}-order:", order), join(&tree.values(order)));
    }
    println!("iddfs:        {}", join(&tree.iddfs()));
    if let Err(e) = tree.validate() {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

// ── CLI types ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Bst,
    Splay,
}

#[derive(Parser)]
#[command(about = "Binary search trees and splay trees over integer keys")]
struct Cli {
    /// Tree variant
    #[arg(long, value_enum, default_value_t = KindArg::Bst, global = true)]
    kind: KindArg,

    /// Do not splay on insert (splay trees only)
    #[arg(long, global = true)]
    no_splay_insert: bool,

    /// Log every structural change and rotation to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a traversal of the tree built from VALUES
    Traverse {
        /// Order: in, pre, post or level
        order: String,

        /// Values inserted in order
        #[arg(allow_negative_numbers = true)]
        values: Vec<i64>,
    },

    /// Search for KEY, then print the root
    Search {
        #[arg(allow_negative_numbers = true)]
        key: i64,

        #[arg(allow_negative_numbers = true)]
        values: Vec<i64>,
    },

    /// Delete KEY, then print the pre-order
    Delete {
        #[arg(allow_negative_numbers = true)]
        key: i64,

        #[arg(allow_negative_numbers = true)]
        values: Vec<i64>,
    },

    /// Print the in-order successor of KEY
    Successor {
        #[arg(allow_negative_numbers = true)]
        key: i64,

        #[arg(allow_negative_numbers = true)]
        values: Vec<i64>,
    },

    /// Show tree statistics and every traversal
    Info {
        #[arg(allow_negative_numbers = true)]
        values: Vec<i64>,
    },
}

// ── main ─────────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        log::LevelFilter::Trace
    } else {
        log::LevelFilter::Info
    };
    env_logger::builder().filter_level(log_level).init();

    let splay_on_insert = !cli.no_splay_insert;

    match cli.command {
        Commands::Traverse { order, values } => {
            let order: Traversal = order.parse().unwrap_or_else(|e| {
                eprintln!("error: {}", e);
                process::exit(1);
            });
            let tree = AnyTree::build(cli.kind, splay_on_insert, &values);
            println!("{}", join(&tree.traversal(order)));
        }

        Commands::Search { key, values } => {
            let mut tree = AnyTree::build(cli.kind, splay_on_insert, &values);
            let t0 = Instant::now();
            let found = tree.search(key);
            info!("search took {:?}", t0.elapsed());
            println!("Found:        {}", if found { "yes" } else { "no" });
            println!("Root:         {}", fmt_opt(tree.root()));
            println!("Pre-order:    {}", join(&tree.traversal(Traversal::Pre)));
        }

        Commands::Delete { key, values } => {
            let mut tree = AnyTree::build(cli.kind, splay_on_insert, &values);
            let before = tree.len();
            let removed = tree.delete(key);
            println!("Removed:      {}", fmt_opt(removed.as_ref()));
            println!("Nodes:        {} -> {}", before, tree.len());
            println!("Root:         {}", fmt_opt(tree.root()));
            println!("Pre-order:    {}", join(&tree.traversal(Traversal::Pre)));
        }

        Commands::Successor { key, values } => {
            let tree = AnyTree::build(cli.kind, splay_on_insert, &values);
            println!("{}", fmt_opt(tree.successor(key).as_ref()));
        }

        Commands::Info { values } => match AnyTree::build(cli.kind, splay_on_insert, &values) {
            AnyTree::Bst(t) => print_info(&t),
            AnyTree::Splay(t) => print_info(&t),
        },
    }
}
