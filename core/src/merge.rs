//! Merges over ascending, duplicate-free doc id lists.

use crate::DocId;

pub fn intersect_sorted(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let (mut i, mut j) = (0, 0);
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    while i < a.len() && j < b.len() {
        if a[i] == b[j] {
            out.push(a[i]);
            i += 1;
            j += 1;
        } else if a[i] < b[j] {
            i += 1;
        } else {
            j += 1;
        }
    }
    out
}

pub fn union_sorted(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let (mut i, mut j) = (0, 0);
    let mut out = Vec::with_capacity(a.len() + b.len());
    while i < a.len() && j < b.len() {
        if a[i] == b[j] {
            out.push(a[i]);
            i += 1;
            j += 1;
        } else if a[i] < b[j] {
            out.push(a[i]);
            i += 1;
        } else {
            out.push(b[j]);
            j += 1;
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

/// Every id in `1..=num_docs` that is not in `a`.
pub fn complement_sorted(a: &[DocId], num_docs: u32) -> Vec<DocId> {
    let mut out = Vec::with_capacity((num_docs as usize).saturating_sub(a.len()));
    let mut rest = a.iter().peekable();
    for id in 1..=num_docs {
        while rest.next_if(|&&x| x < id).is_some() {}
        if rest.next_if_eq(&&id).is_none() {
            out.push(id);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersect_keeps_common_ids() {
        assert_eq!(intersect_sorted(&[1, 3, 5, 9], &[3, 4, 9]), vec![3, 9]);
        assert!(intersect_sorted(&[1, 2], &[]).is_empty());
    }

    #[test]
    fn union_dedups() {
        assert_eq!(union_sorted(&[1, 3, 5], &[2, 3, 6]), vec![1, 2, 3, 5, 6]);
        assert_eq!(union_sorted(&[], &[4]), vec![4]);
    }

    #[test]
    fn complement_within_collection() {
        assert_eq!(complement_sorted(&[2, 4], 5), vec![1, 3, 5]);
        assert_eq!(complement_sorted(&[], 3), vec![1, 2, 3]);
        assert!(complement_sorted(&[1, 2, 3], 3).is_empty());
        assert!(complement_sorted(&[], 0).is_empty());
    }
}
