//! Builds a tree from the command line and draws it.
//!
//! ```text
//! cargo run --example print_tree -- 10 5 15 3 7 12 18 --remove 7
//! RUST_LOG=avl_bst=trace cargo run --example print_tree -- --range 16
//! ```

use avl_bst::{AvlTree, DiagramStyle, Side};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Insert keys into an AVL tree and print its diagram")]
struct Args {
    /// Keys to insert, in order
    keys: Vec<i64>,

    /// Also insert 1..=N in ascending order
    #[arg(long, value_name = "N")]
    range: Option<i64>,

    /// Keys to remove after inserting
    #[arg(long, num_args = 1..)]
    remove: Vec<i64>,

    /// Draw branches with ASCII characters
    #[arg(long)]
    ascii: bool,

    /// Also list each pre-order visit
    #[arg(long)]
    visits: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut tree = AvlTree::new();
    tree.extend(args.keys.iter().copied());
    if let Some(n) = args.range {
        tree.extend(1..=n);
    }
    for key in &args.remove {
        if !tree.remove(key) {
            info!(key, "key not present");
        }
    }
    info!(len = tree.len(), height = tree.height(), "tree built");

    let style = if args.ascii {
        DiagramStyle::ascii()
    } else {
        DiagramStyle::default()
    };
    print!("{}", tree.diagram_with(style));

    if args.visits {
        for visit in tree.traverse() {
            let side = match visit.side {
                Side::Root => "root",
                Side::Left => "left",
                Side::Right => "right",
            };
            println!("{:indent$}{} ({side})", "", visit.key, indent = visit.depth * 2);
        }
    }
}
