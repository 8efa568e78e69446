// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Pairing of test step markup with expected result markup.

/// Pair of a test step and its expected result, each an HTML markup
/// fragment in source document order.
pub type StepPair = (String, String);

/// Aligns two parallel HTML fragments of steps and expected results into
/// ordered [`StepPair`]s.
///
/// Both fragments are expected to be either a single block-level element or
/// an ordered list (`<ol>`) of list items. When both carry a list with the
/// same number of items, the items' inner markup is zipped index-for-index.
/// In every other shape the fragments cannot be meaningfully split, so the
/// two whole fragments come back as a single pair.
#[must_use]
pub fn map_steps(steps: &str, expected_results: &str) -> Vec<StepPair> {
    match (list_items(steps), list_items(expected_results)) {
        (Some(steps), Some(expected)) if steps.len() == expected.len() => {
            steps.into_iter().zip(expected).collect()
        }
        _ => vec![(steps.to_owned(), expected_results.to_owned())],
    }
}

/// Extracts the inner markup of every `<li>` of a fragment holding a single
/// ordered list.
///
/// Returns [`None`] for fragments that are not a lone well-formed `<ol>`
/// with at least one item, which makes the caller treat them as atomic.
fn list_items(fragment: &str) -> Option<Vec<String>> {
    let wrapped = format!("<root>{fragment}</root>");
    let document = roxmltree::Document::parse(&wrapped).ok()?;
    let mut elements =
        document.root_element().children().filter(roxmltree::Node::is_element);
    let list = elements.next().filter(|n| n.has_tag_name("ol"))?;
    if elements.next().is_some() {
        return None;
    }
    let items = list
        .children()
        .filter(|n| n.has_tag_name("li"))
        .map(|li| inner_markup(&wrapped, li))
        .collect::<Vec<_>>();
    (!items.is_empty()).then_some(items)
}

/// Slices a node's inner markup out of the source it was parsed from,
/// keeping nested tags verbatim.
fn inner_markup(source: &str, node: roxmltree::Node<'_, '_>) -> String {
    match (node.first_child(), node.last_child()) {
        (Some(first), Some(last)) => {
            source[first.range().start..last.range().end].to_owned()
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MULTIPLE_STEPS: &str = "<ol>
  <li><p>First step</p></li>
  <li><p>Second step</p></li>
  <li><p>Third step</p></li>
</ol>
";

    const MULTIPLE_EXPECTED_RESULTS: &str = "<ol>
  <li><p>First step expected result.</p></li>
  <li><p>Second step expected result.</p></li>
  <li><p>Third step expected result.</p></li>
</ol>
";

    const SINGLE_STEP: &str = "<p>Single step</p>";

    const SINGLE_EXPECTED_RESULT: &str = "<p>Single step expected result.</p>";

    #[test]
    fn single_blocks_map_to_one_pair() {
        assert_eq!(
            map_steps(SINGLE_STEP, SINGLE_EXPECTED_RESULT),
            vec![(SINGLE_STEP.to_owned(), SINGLE_EXPECTED_RESULT.to_owned())],
        );
    }

    #[test]
    fn equal_length_lists_zip_index_aligned() {
        assert_eq!(
            map_steps(MULTIPLE_STEPS, MULTIPLE_EXPECTED_RESULTS),
            vec![
                (
                    "<p>First step</p>".to_owned(),
                    "<p>First step expected result.</p>".to_owned(),
                ),
                (
                    "<p>Second step</p>".to_owned(),
                    "<p>Second step expected result.</p>".to_owned(),
                ),
                (
                    "<p>Third step</p>".to_owned(),
                    "<p>Third step expected result.</p>".to_owned(),
                ),
            ],
        );
    }

    #[test]
    fn mismatched_lengths_fall_back_to_whole_fragments() {
        let two_steps = "<ol>
  <li><p>First step</p></li>
  <li><p>Second step</p></li>
</ol>
";
        assert_eq!(
            map_steps(two_steps, MULTIPLE_EXPECTED_RESULTS),
            vec![(
                two_steps.to_owned(),
                MULTIPLE_EXPECTED_RESULTS.to_owned(),
            )],
        );
    }

    #[test]
    fn nested_markup_is_preserved_verbatim() {
        let steps = "<ol><li><p>Run <code>ls -la</code></p></li></ol>";
        let expected = "<ol><li>A <em>full</em> listing</li></ol>";
        assert_eq!(
            map_steps(steps, expected),
            vec![(
                "<p>Run <code>ls -la</code></p>".to_owned(),
                "A <em>full</em> listing".to_owned(),
            )],
        );
    }

    #[test]
    fn malformed_markup_is_treated_as_atomic() {
        let truncated = "<ol><li><p>First step</li>";
        assert_eq!(
            map_steps(truncated, SINGLE_EXPECTED_RESULT),
            vec![(
                truncated.to_owned(),
                SINGLE_EXPECTED_RESULT.to_owned(),
            )],
        );
    }

    #[test]
    fn plain_text_fragments_map_to_one_pair() {
        assert_eq!(
            map_steps("steps", "expectedresults"),
            vec![("steps".to_owned(), "expectedresults".to_owned())],
        );
    }
}
