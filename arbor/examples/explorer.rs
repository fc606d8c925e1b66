//! Prints an in-memory file tree through a few expand/collapse operations.
//!
//! Logs go to `explorer.log`.

use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::time::{Duration, Instant};

use arbor::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};

// ============================================================================
// File tree
// ============================================================================

#[derive(Default)]
struct Files {
    entries: BTreeMap<String, Vec<String>>,
    expanded: HashSet<String>,
    selected: HashSet<String>,
}

impl Files {
    fn sample() -> Self {
        let mut files = Files::default();
        for path in [
            "src/main.rs",
            "src/tree/mod.rs",
            "src/tree/node.rs",
            "src/tree/ops.rs",
            "tests/tree.rs",
            "Cargo.toml",
        ] {
            files.insert(path);
        }
        files
    }

    fn insert(&mut self, path: &str) {
        let mut parent = String::new();
        for part in path.split('/') {
            let full = if parent.is_empty() {
                part.to_string()
            } else {
                format!("{parent}/{part}")
            };
            let siblings = self.entries.entry(parent.clone()).or_default();
            if !siblings.contains(&full) {
                siblings.push(full.clone());
            }
            parent = full;
        }
    }
}

impl TreeDelegate for Files {
    type Item = String;

    fn roots(&self) -> Vec<String> {
        self.children(&String::new())
    }

    fn children(&self, item: &String) -> Vec<String> {
        self.entries.get(item).cloned().unwrap_or_default()
    }

    fn id(&self, item: &String) -> String {
        item.clone()
    }

    fn is_expanded(&self, item: &String) -> bool {
        self.expanded.contains(item)
    }

    fn set_expanded(&mut self, item: &String, expanded: bool) {
        if expanded {
            self.expanded.insert(item.clone());
        } else {
            self.expanded.remove(item);
        }
    }

    fn is_selected(&self, item: &String) -> bool {
        self.selected.contains(item)
    }

    fn set_selected(&mut self, item: &String, selected: bool) {
        if selected {
            self.selected.insert(item.clone());
        } else {
            self.selected.remove(item);
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

fn render(tree: &TreeController<Files>, title: &str) -> arbor::Result<()> {
    println!("-- {title} (revision {})", tree.revision());
    for index in 0..tree.len() {
        let row = tree.row(index)?;
        let mut line = String::new();
        for skip in tree.skip_levels(index)?.iter().skip(1) {
            line.push_str(if *skip { "    " } else { "│   " });
        }
        if row.node.level > 0 {
            line.push_str(if row.node.has_next_sibling {
                "├── "
            } else {
                "└── "
            });
        }
        let name = row.node.id.rsplit('/').next().unwrap_or(&row.node.id);
        line.push_str(name);
        if row.selected {
            line.push_str(" *");
        }
        match row.status {
            AnimationStatus::Idle => {}
            status => line.push_str(&format!("  [{status:?} {:.2}]", row.factor)),
        }
        println!("{line}");
    }
    Ok(())
}

/// Drive the running transition with a simulated frame clock.
fn play(tree: &mut TreeController<Files>) {
    let start = Instant::now();
    let mut frame = 0;
    while let Some(progress) = tree.tick(start + Duration::from_millis(frame * 100)) {
        log::debug!("frame {frame}: {progress:.2}");
        frame += 1;
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Ok(log_file) = File::create("explorer.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);
    }

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
    }
}

async fn run() -> arbor::Result<()> {
    let mut tree = TreeController::new(Files::sample());
    render(&tree, "initial")?;

    tree.expand(&"src".to_string());
    render(&tree, "expand src")?;
    play(&mut tree);

    tree.expand_to("src/tree/ops.rs")?;
    tree.select(&"src/tree/ops.rs".to_string());
    render(&tree, "expand to src/tree/ops.rs")?;
    play(&mut tree);

    let settle = tree.collapse(&"src".to_string());
    tree.advance(0.5);
    render(&tree, "collapse src, halfway")?;
    play(&mut tree);
    settle.await?;
    render(&tree, "collapsed")?;

    tree.expand_all();
    play(&mut tree);
    render(&tree, "expand all")?;

    let guide = tree.guide_path(2, IndentGuide::default(), &GuideMetrics::default())?;
    println!("-- guide for row 2: {}", guide.to_svg());

    Ok(())
}
