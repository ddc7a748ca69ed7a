use std::fmt;

use super::{DecisionTree, LeafReason, TreeNode};
use crate::Float;

/// Struct to print a fitted decision tree in LaTex using tikz and forest.
///
/// Internal nodes show the tested attribute and its gain ratio, edges are labeled with the
/// attribute value leading to the child.
///
/// ### Usage
///
/// ```rust
/// use id3_trees::prelude::*;
/// use id3_trees::{AttributeDomain, ClassLabel, DecisionTree, Example};
///
/// let domain = AttributeDomain::new().with_attribute("wind", vec!["weak", "strong"]);
/// let mut dataset = Dataset::new(
///     vec![
///         Example::new(ClassLabel::Positive).with_value("wind", "weak"),
///         Example::new(ClassLabel::Negative).with_value("wind", "strong"),
///     ],
///     domain,
/// );
/// // Fit the tree
/// let tree = DecisionTree::<f64>::params().fit(&mut dataset).unwrap();
/// // Export to tikz
/// let tikz = tree.export_to_tikz().with_legend();
/// let latex_tree = tikz.to_string();
/// // Now you can write latex_tree to the preferred destination
/// assert!(latex_tree.contains("wind"));
/// ```
pub struct Tikz<'a, F: Float> {
    legend: bool,
    complete: bool,
    tree: &'a DecisionTree<F>,
}

impl<'a, F: Float> Tikz<'a, F> {
    pub fn new(tree: &'a DecisionTree<F>) -> Self {
        Tikz {
            legend: false,
            complete: true,
            tree,
        }
    }

    fn format_node(&self, node: &'a TreeNode<F>) -> String {
        let depth = vec![""; node.depth() + 1].join("\t");
        let edge = match node.branch_value() {
            Some(value) => format!(", edge label={{node[midway, left] {{{}}}}}", escape(value)),
            None => String::new(),
        };

        if let Some(prediction) = node.prediction() {
            let mut out = format!("{}[Label: {}", depth, prediction);
            if self.legend {
                if let Some(reason) = node.leaf_reason() {
                    out.push_str(&format!(" \\\\ {}", reason_name(reason)));
                }
            }
            out.push_str(&edge);
            out.push(']');

            out
        } else {
            let split = match node.split() {
                Some(split) => split,
                None => return String::new(),
            };
            let mut out = format!(
                "{}[{} \\\\ Ratio ${:.3}$",
                depth,
                escape(split.attribute()),
                split.gain_ratio()
            );
            out.push_str(&edge);
            for child in node.children() {
                out.push('\n');
                out.push_str(&self.format_node(child));
            }
            out.push(']');

            out
        }
    }

    /// Whether a complete Tex document should be generated
    pub fn complete(mut self, complete: bool) -> Self {
        self.complete = complete;

        self
    }

    /// Annotate every leaf with the reason it was not split further
    pub fn with_legend(mut self) -> Self {
        self.legend = true;

        self
    }
}

fn reason_name(reason: LeafReason) -> &'static str {
    match reason {
        LeafReason::Pure => "pure",
        LeafReason::AttributesExhausted => "exhausted",
        LeafReason::NotSignificant => "not significant",
        LeafReason::EmptyPartition => "empty",
    }
}

fn escape(text: &str) -> String {
    text.replace('_', "\\_").replace('&', "\\&").replace('%', "\\%")
}

impl<'a, F: Float> fmt::Display for Tikz<'a, F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut out = String::new();
        if self.complete {
            out.push_str(
                r#"
\documentclass[margin=10pt]{standalone}
\usepackage{tikz,forest}
\usetikzlibrary{arrows.meta}

\forestset{
default preamble={
where n children=0{
  tier=word,
}{},
for tree={
  edge+={thick, -Latex},
  s sep'+=1cm,
  draw,
  thick,
  align=center,
}
}
}

\begin{document}
"#,
            );
        }

        out.push_str("\\begin{forest}\n");
        out.push_str(&self.format_node(self.tree.root_node()));
        out.push_str("\n\\end{forest}");
        if self.complete {
            out.push_str("\n\\end{document}");
        }

        write!(f, "{}", out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision_trees::PredictionMode;
    use crate::decision_trees::{build, Id3ValidParams};
    use crate::{AttributeDomain, ClassLabel, Example, ParamGuard};

    fn tree() -> DecisionTree<f64> {
        let domain = AttributeDomain::new()
            .with_attribute("wind_speed", vec!["weak", "strong", "storm"]);
        let mut examples = vec![
            Example::new(ClassLabel::Positive).with_value("wind_speed", "weak"),
            Example::new(ClassLabel::Negative).with_value("wind_speed", "strong"),
        ];
        let params: Id3ValidParams<f64> = DecisionTree::params().check_unwrap();
        let root = build(&mut examples, &domain, &params).unwrap();

        DecisionTree::from_root(root, PredictionMode::Blind)
    }

    #[test]
    fn edges_carry_branch_values() {
        let latex = tree().export_to_tikz().complete(false).to_string();

        assert!(latex.starts_with("\\begin{forest}"));
        assert!(latex.contains("[wind\\_speed"));
        assert!(latex.contains("{weak}"));
        assert!(latex.contains("{strong}"));
        assert!(latex.contains("{storm}"));
        assert!(!latex.contains("documentclass"));
    }

    #[test]
    fn legend_names_leaf_reasons() {
        let latex = tree().export_to_tikz().with_legend().to_string();

        assert!(latex.contains("documentclass"));
        assert!(latex.contains("pure"));
        assert!(latex.contains("empty"));
    }
}
