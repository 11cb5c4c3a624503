use crate::index::TermFreq;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Order query terms by ascending document frequency.
///
/// The rarest term comes first so the merge starts from the smallest
/// candidate set; every later intersection can only shrink it. Frequencies
/// come from a lookup closure (the lexicon); a term the lookup does not
/// know gets frequency 0, which floats it to the front, and an AND query
/// then collapses to empty on the first merge instead of scanning anything.
pub fn order_terms<F>(terms: &[String], doc_freq: F) -> Vec<TermFreq>
where
    F: Fn(&str) -> Option<u32>,
{
    let mut heap: BinaryHeap<Reverse<TermFreq>> = terms
        .iter()
        .map(|t| Reverse(TermFreq::new(t.as_str(), doc_freq(t).unwrap_or(0))))
        .collect();

    let mut ordered = Vec::with_capacity(heap.len());
    while let Some(Reverse(tf)) = heap.pop() {
        ordered.push(tf);
    }
    ordered
}
