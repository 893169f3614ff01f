use bytedelta::{diff, patch, write_to};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let old_path = "old_file.txt";
    let new_path = "new_file.txt";
    let patch_path = "changes.bdlt";

    // Clean up previous run
    let _ = fs::remove_file(old_path);
    let _ = fs::remove_file(new_path);
    let _ = fs::remove_file(patch_path);

    // 1. Create test files
    println!("Creating test files...");
    fs::write(
        old_path,
        b"This is a small file.\nIt has multiple lines.\nSome stay the same.\n",
    )?;
    fs::write(
        new_path,
        b"This is a small file.\nIt has CHANGED lines.\nSome stay the same.\nAnd one more.\n",
    )?;

    let old = fs::read(old_path)?;
    let new = fs::read(new_path)?;
    println!("Old file size: {} bytes", old.len());
    println!("New file size: {} bytes", new.len());

    // 2. Diff and write the patch file
    let deltas = diff(&old, &new);
    let mut writer = BufWriter::new(File::create(patch_path)?);
    write_to(&mut writer, &deltas, &old)?;
    writer.flush()?;
    println!(
        "Wrote {} records to {patch_path} ({} bytes)",
        deltas.len(),
        fs::metadata(patch_path)?.len()
    );

    // 3. Apply the patch file to the old contents
    let reader = BufReader::new(File::open(patch_path)?);
    let patched = patch(&old, reader)?;

    let outcome = if patched == new {
        println!("Success! Patched contents match {new_path}");
        Ok(())
    } else {
        Err(io::Error::other("patched contents differ").into())
    };

    // Cleanup
    fs::remove_file(old_path)?;
    fs::remove_file(new_path)?;
    fs::remove_file(patch_path)?;

    outcome
}
