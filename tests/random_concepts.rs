use rand::{rngs::SmallRng, SeedableRng};

use id3_trees::prelude::*;
use id3_trees::{
    AttributeDomain, ClassLabel, DecisionTree, Example, NodeIter, PredictionMode, TreeNode,
};
use id3_trees_datasets::generate::{random_concept, with_unknown_values};

/// Checks the structural properties every fitted tree has
fn check_structure(node: &TreeNode<f64>, domain: &AttributeDomain, path: &mut Vec<String>) {
    if let Some(split) = node.split() {
        let attribute = split.attribute().to_owned();
        assert!(!path.contains(&attribute), "`{}` tested twice", attribute);

        let values = domain.values(&attribute).expect("split on a declared attribute");
        let branches = split
            .children()
            .iter()
            .map(|child| child.branch_value().expect("children carry a branch value"))
            .collect::<Vec<_>>();
        assert_eq!(branches, values.iter().map(String::as_str).collect::<Vec<_>>());

        path.push(attribute);
        for child in split.children() {
            assert_eq!(child.depth(), node.depth() + 1);
            check_structure(child, domain, path);
        }
        path.pop();
    }
}

#[test]
fn consistent_concepts_are_learned_exactly() -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(42);

    for _ in 0..20 {
        let mut dataset = random_concept(150, 5, 3, 2, &mut rng);
        let tree = DecisionTree::<f64>::params().fit(&mut dataset)?;

        check_structure(tree.root_node(), dataset.domain(), &mut Vec::new());
        assert!(tree.max_depth() <= dataset.domain().len());

        let cm = tree.predict(&dataset).confusion_matrix(&dataset)?;
        assert_eq!(cm.total(), 150);
        assert_eq!(cm.false_positives() + cm.false_negatives(), 0);
    }

    Ok(())
}

#[test]
fn gated_trees_beat_the_majority_class() -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(3);

    for _ in 0..10 {
        let mut dataset = random_concept(120, 4, 3, 1, &mut rng);
        let majority = dataset.label_counts().positive.max(dataset.label_counts().negative);

        let tree = DecisionTree::params()
            .significance_level(Some(0.05))
            .fit(&mut dataset)?;
        check_structure(tree.root_node(), dataset.domain(), &mut Vec::new());

        // every leaf predicts the majority of the examples it covers
        let cm = tree.predict(&dataset).confusion_matrix(&dataset)?;
        assert!(cm.true_positives() + cm.true_negatives() >= majority);
    }

    Ok(())
}

#[test]
fn unknown_values_are_resolved_while_fitting() {
    let mut rng = SmallRng::seed_from_u64(11);

    for _ in 0..10 {
        let dataset = random_concept(200, 4, 3, 2, &mut rng);
        let mut dataset = with_unknown_values(dataset, 0.1, &mut rng);

        match DecisionTree::<f64>::params().fit(&mut dataset) {
            Ok(tree) => {
                check_structure(tree.root_node(), dataset.domain(), &mut Vec::new());

                // the root split sees every example, so none keeps an unknown root value
                if let Some(attribute) = tree.root_node().attribute() {
                    assert!(dataset
                        .examples()
                        .iter()
                        .all(|example| !example.is_unknown(attribute)));
                }
            }
            // indistinguishable examples with mixed labels after imputation
            Err(Error::AllAttributesRejected { .. }) => {}
            Err(err) => panic!("unexpected error: {}", err),
        }
    }
}

#[test]
fn prediction_tolerates_unknown_values() -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(5);
    let mut train = random_concept(200, 4, 3, 2, &mut rng);
    let tree = DecisionTree::<f64>::params().fit(&mut train)?;

    // without unknown values both modes walk the same path
    let clean = random_concept(50, 4, 3, 2, &mut rng);
    for example in clean.examples() {
        assert_eq!(
            tree.predict_with_mode(example, PredictionMode::Blind),
            tree.predict_with_mode(example, PredictionMode::Evaluation)
        );
    }

    let hidden = with_unknown_values(clean, 0.5, &mut rng);
    assert_eq!(tree.predict(&hidden).len(), 50);

    // an example without any attribute follows the stored modes down to a leaf
    let empty = Example::new(ClassLabel::Positive);
    let leaf_labels = NodeIter::new(tree.root_node())
        .filter_map(TreeNode::prediction)
        .collect::<Vec<_>>();
    assert!(leaf_labels.contains(&tree.predict(&empty)));

    Ok(())
}
