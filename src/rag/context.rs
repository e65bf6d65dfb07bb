//! Context assembly from retrieved chunks.

use crate::vector_index::QueryResult;

/// Join retrieved chunk texts for the prompt's context slot.
///
/// Chunks appear in similarity order, separated by blank lines, so the
/// same retrieval always produces the same context block.
pub fn format_context_for_prompt(results: &[QueryResult]) -> String {
    results
        .iter()
        .map(|result| result.chunk.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::Chunk;

    fn result(id: u64, text: &str, score: f32) -> QueryResult {
        QueryResult {
            chunk: Chunk {
                id,
                text: text.to_string(),
                start_offset: 0,
            },
            score,
        }
    }

    #[test]
    fn test_empty_results_give_empty_context() {
        assert_eq!(format_context_for_prompt(&[]), "");
    }

    #[test]
    fn test_chunks_joined_in_given_order() {
        let results = vec![
            result(3, "Most relevant passage.", 0.9),
            result(1, "Second passage.", 0.5),
        ];
        assert_eq!(
            format_context_for_prompt(&results),
            "Most relevant passage.\n\nSecond passage."
        );
    }
}
