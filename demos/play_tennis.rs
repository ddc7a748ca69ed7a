use std::fs::File;
use std::io::Write;

use id3_trees::prelude::*;
use id3_trees::{ClassLabel, DecisionTree, Example, PredictionMode};
use id3_trees_datasets::play_tennis;

fn main() -> Result<()> {
    // 1. Grow the full tree
    let mut dataset = play_tennis();
    let tree = DecisionTree::<f64>::params().fit(&mut dataset)?;

    let cm = tree.predict(&dataset).confusion_matrix(&dataset)?;
    println!("{:?}", cm);
    println!(
        "Training accuracy: {:.2}, {} leaves, depth {}",
        cm.accuracy(),
        tree.num_leaves(),
        tree.max_depth()
    );

    // 2. Classify an unseen day with an unknown wind
    let day = Example::new(ClassLabel::Negative)
        .with_value("outlook", "rain")
        .with_value("temperature", "cool")
        .with_value("humidity", "high")
        .with_unknown("wind");
    println!(
        "Rainy day, unknown wind: {} (blind), {} (evaluation)",
        tree.predict(&day),
        tree.predict_with_mode(&day, PredictionMode::Evaluation)
    );

    // 3. Chi-square pre-pruning at two significance levels
    for level in &[0.5, 0.05] {
        let pruned = DecisionTree::params()
            .significance_level(Some(*level))
            .fit(&mut play_tennis())?;
        println!(
            "Significance level {}: {} leaves",
            level,
            pruned.num_leaves()
        );
    }

    // 4. Export the full tree
    let mut tikz = File::create("play_tennis.tex").unwrap();
    tikz.write_all(tree.export_to_tikz().with_legend().to_string().as_bytes())
        .unwrap();
    println!(" => generate tree description with `latex play_tennis.tex`!");

    Ok(())
}
