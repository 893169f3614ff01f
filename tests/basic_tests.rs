use bytedelta::{Delta, apply, apply_all, compact, cost, diff};

fn assert_diff(a: &[u8], b: &[u8], expected: &[Delta]) {
    let deltas = diff(a, b);
    assert_eq!(
        deltas,
        expected,
        "diff({:?}, {:?})",
        String::from_utf8_lossy(a),
        String::from_utf8_lossy(b)
    );
    assert_eq!(apply_all(a, &deltas), b, "replay should rebuild the target");
}

fn assert_replay(given: &[u8], deltas: &[Delta], expected: &[u8]) {
    let mut buffer = given.to_vec();
    for delta in deltas {
        buffer = apply(&buffer, delta);
    }
    assert_eq!(
        String::from_utf8_lossy(&buffer),
        String::from_utf8_lossy(expected)
    );
}

#[test]
fn test_diff_empty() {
    assert_diff(b"", b"", &[]);
}

#[test]
fn test_diff_equal() {
    assert_diff(b"foobar", b"foobar", &[]);
}

#[test]
fn test_diff_empty_source_inserts_everything() {
    assert_diff(b"", b"abc", &[Delta::insert_at(0, *b"abc")]);
}

#[test]
fn test_diff_empty_target_deletes_everything() {
    assert_diff(b"abc", b"", &[Delta::delete_at(0, 3)]);
}

#[test]
fn test_diff_insert_prefix() {
    assert_diff(b"bar", b"foobar", &[Delta::insert_at(0, *b"foo")]);
}

#[test]
fn test_diff_insert_infix() {
    assert_diff(b"foar", b"foobar", &[Delta::insert_at(2, *b"ob")]);
}

#[test]
fn test_diff_insert_suffix() {
    assert_diff(b"foo", b"foobar", &[Delta::insert_at(3, *b"bar")]);
}

#[test]
fn test_diff_delete_prefix() {
    assert_diff(b"foobar", b"bar", &[Delta::delete_at(0, 3)]);
}

#[test]
fn test_diff_delete_infix() {
    assert_diff(b"foobar", b"foar", &[Delta::delete_at(2, 2)]);
}

#[test]
fn test_diff_delete_suffix() {
    assert_diff(b"foobar", b"foo", &[Delta::delete_at(3, 3)]);
}

#[test]
fn test_diff_swap() {
    assert_diff(
        b"foobar",
        b"barfoo",
        &[Delta::insert_at(0, *b"bar"), Delta::delete_at(6, 3)],
    );
}

#[test]
fn test_diff_delete_vowels() {
    assert_diff(
        b"foobar",
        b"fbr",
        &[Delta::delete_at(1, 2), Delta::delete_at(2, 1)],
    );
}

#[test]
fn test_diff_delete_consonants() {
    assert_diff(
        b"foobar",
        b"ooa",
        &[
            Delta::delete_at(0, 1),
            Delta::delete_at(2, 1),
            Delta::delete_at(3, 1),
        ],
    );
}

#[test]
fn test_diff_insert_vowels() {
    assert_diff(
        b"fbr",
        b"foobar",
        &[Delta::insert_at(1, *b"oo"), Delta::insert_at(4, *b"a")],
    );
}

#[test]
fn test_diff_insert_consonants() {
    assert_diff(
        b"ooa",
        b"foobar",
        &[
            Delta::insert_at(0, *b"f"),
            Delta::insert_at(3, *b"b"),
            Delta::insert_at(5, *b"r"),
        ],
    );
}

#[test]
fn test_diff_replace() {
    assert_diff(b"foo", b"bar", &[Delta::replace_at(0, 3, *b"bar")]);
}

#[test]
fn test_diff_reverse() {
    assert_diff(
        b"foobar",
        b"raboof",
        &[
            Delta::replace_at(0, 1, *b"rab"),
            Delta::replace_at(5, 3, *b"f"),
        ],
    );
}

#[test]
fn test_diff_greeting() {
    assert_diff(
        b"Hello World",
        b"Hi Earth",
        &[
            Delta::replace_at(1, 4, *b"i"),
            Delta::replace_at(3, 2, *b"Ea"),
            Delta::replace_at(6, 2, *b"th"),
        ],
    );
}

#[test]
fn test_diff_binary_data() {
    let original: Vec<u8> = vec![0x00, 0xFF, 0x10, 0x20, 0x30];
    let modified: Vec<u8> = vec![0x00, 0x10, 0x20, 0xEE, 0x30, 0x00];
    let deltas = diff(&original, &modified);
    assert_eq!(apply_all(&original, &deltas), modified);
}

#[test]
fn test_apply_no_records_is_identity() {
    assert_replay(b"", &[], b"");
    assert_replay(b"foobar", &[], b"foobar");
}

#[test]
fn test_apply_insert_prefix() {
    assert_replay(b"bar", &[Delta::insert_at(0, *b"foo")], b"foobar");
}

#[test]
fn test_apply_insert_infix() {
    assert_replay(b"foar", &[Delta::insert_at(2, *b"ob")], b"foobar");
}

#[test]
fn test_apply_insert_suffix() {
    assert_replay(b"foo", &[Delta::insert_at(3, *b"bar")], b"foobar");
}

#[test]
fn test_apply_delete_prefix() {
    assert_replay(b"foobar", &[Delta::delete_at(0, 3)], b"bar");
}

#[test]
fn test_apply_delete_infix() {
    assert_replay(b"foobar", &[Delta::delete_at(2, 2)], b"foar");
}

#[test]
fn test_apply_delete_suffix() {
    assert_replay(b"foobar", &[Delta::delete_at(3, 3)], b"foo");
}

#[test]
fn test_apply_swap() {
    assert_replay(
        b"foobar",
        &[Delta::insert_at(0, *b"bar"), Delta::delete_at(6, 3)],
        b"barfoo",
    );
}

#[test]
fn test_apply_delete_consonants() {
    assert_replay(
        b"foobar",
        &[
            Delta::delete_at(0, 1),
            Delta::delete_at(2, 1),
            Delta::delete_at(3, 1),
        ],
        b"ooa",
    );
}

#[test]
fn test_apply_insert_consonants() {
    assert_replay(
        b"ooa",
        &[
            Delta::insert_at(0, *b"f"),
            Delta::insert_at(3, *b"b"),
            Delta::insert_at(5, *b"r"),
        ],
        b"foobar",
    );
}

#[test]
fn test_apply_reverse() {
    assert_replay(
        b"foobar",
        &[
            Delta::replace_at(0, 1, *b"rab"),
            Delta::replace_at(5, 3, *b"f"),
        ],
        b"raboof",
    );
}

#[test]
fn test_apply_clamps_instead_of_panicking() {
    assert_eq!(apply(b"foo", &Delta::replace_at(2, 50, *b"X")), b"foX");
    assert_eq!(apply(b"foo", &Delta::replace_at(9, 1, *b"X")), b"fooX");
    assert_eq!(apply(b"", &Delta::delete_at(0, 4)), b"");
}

#[test]
fn test_compact_contiguous_deletes() {
    assert_eq!(
        compact(vec![Delta::delete_at(0, 1), Delta::delete_at(1, 1)]),
        vec![Delta::delete_at(0, 2)]
    );
}

#[test]
fn test_compact_keeps_separated_records() {
    let deltas = vec![Delta::delete_at(0, 1), Delta::delete_at(2, 1)];
    assert_eq!(compact(deltas.clone()), deltas);
}

#[test]
fn test_cost_weights() {
    assert_eq!(cost(&[]), 0);
    assert_eq!(cost(&[Delta::insert_at(0, *b"a")]), 9);
    assert_eq!(cost(&[Delta::delete_at(0, 1)]), 2);
    assert_eq!(cost(&[Delta::replace_at(0, 1, *b"a")]), 10);
}

#[test]
fn test_tie_prefers_delete() {
    // Dropping the leading 'a' and inserting 'b' in front of it leave
    // equally expensive remainders, so the deletion wins.
    assert_diff(
        b"aabba",
        b"bac",
        &[
            Delta::delete_at(0, 2),
            Delta::delete_at(1, 1),
            Delta::insert_at(2, *b"c"),
        ],
    );
}
