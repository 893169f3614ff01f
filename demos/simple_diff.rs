use bytedelta::{cost, diff, replay};

fn main() {
    // 1. Two versions of the same text
    let old_data = b"Hello World";
    let new_data = b"Hi Earth";

    println!("Original: {:?}", String::from_utf8_lossy(old_data));
    println!("Modified: {:?}", String::from_utf8_lossy(new_data));

    // 2. Compute the edit list. Offsets are already rebased, so each record
    // applies to the buffer the previous one produced.
    let deltas = diff(old_data, new_data);
    println!(
        "Computed {} records with cost {}",
        deltas.len(),
        cost(&deltas)
    );

    // 3. Replay it one record at a time
    let mut last = old_data.to_vec();
    for (step, (delta, buffer)) in replay(old_data, &deltas).enumerate() {
        println!(
            "{} offset {} delete {} insert {:?} -> {:?}",
            step + 1,
            delta.offset,
            delta.delete,
            String::from_utf8_lossy(&delta.insert),
            String::from_utf8_lossy(&buffer)
        );
        last = buffer;
    }

    // Verify
    assert_eq!(last, new_data);
    println!("Success! Replayed data matches modified data.");
}
