use crate::compare::{Compare, Transparent};
use crate::entry::Entry;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use rayon::slice::ParallelSliceMut;

pub mod map;
pub mod set;

/// Collects the pairs of a parallel iterator into entries sorted by `cmp`.
/// Entries with equal keys keep the order the iterator produced them in.
fn collect_sorted<K, V, C, I>(cmp: &C, par_iter: I) -> Vec<Entry<K, V>>
where
    K: Send,
    V: Send,
    C: Compare<K> + Sync,
    I: IntoParallelIterator<Item = (K, V)>,
{
    let mut entries: Vec<Entry<K, V>> = par_iter.into_par_iter().map(Entry::from).collect();

    let cmp = Transparent::new(cmp);
    entries.par_sort_by(|a, b| cmp.entries(a, b));
    entries
}
