//! Integration tests for moving attachments in and out of a vault.

use std::fs;

use coffer::fs::{secure_erase, Eraser, SecureEraser};
use coffer::vault::{Attachment, Container, Record};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

fn eraser() -> SecureEraser<StdRng> {
    SecureEraser::with_rng(StdRng::seed_from_u64(1), 2)
}

#[test]
fn upload_then_map_returns_original_bytes() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("passport.jpg");
    let bytes: Vec<u8> = (0..=255u8).cycle().take(70_000).collect();
    fs::write(&source, &bytes).unwrap();

    let mut c = Container::new();
    let mut att = Attachment::new("passport", "documents");
    att.upload(&source, None).unwrap();
    let uid = c.upsert(att).unwrap();

    let mapped = c.attachment_mut(&uid).unwrap().map_in(tmp.path()).unwrap();
    assert_eq!(fs::read(&mapped).unwrap(), bytes);
    assert_ne!(mapped, source);
}

#[test]
fn map_twice_unmap_then_remap() {
    let tmp = TempDir::new().unwrap();
    let mut c = Container::new();
    let uid = c
        .upsert(Attachment::from_bytes("cert", "", b"-----BEGIN CERT-----".to_vec()))
        .unwrap();
    let att = c.attachment_mut(&uid).unwrap();

    let first = att.map_in(tmp.path()).unwrap();
    assert_eq!(att.map_in(tmp.path()).unwrap(), first);

    att.unmap(&mut eraser()).unwrap();
    assert!(!first.exists());
    assert!(!att.is_mapped());

    let again = att.map_in(tmp.path()).unwrap();
    assert_eq!(fs::read(&again).unwrap(), b"-----BEGIN CERT-----");
    att.unmap(&mut eraser()).unwrap();
}

#[test]
fn replacing_mapped_attachment_rewrites_its_file() {
    let tmp = TempDir::new().unwrap();
    let mut c = Container::new();
    let uid = c
        .upsert(Attachment::from_bytes("a", "", b"old".to_vec()))
        .unwrap();
    let mapped = c.attachment_mut(&uid).unwrap().map_in(tmp.path()).unwrap();

    let mut edited = c.get::<Attachment>(&uid).unwrap().clone();
    edited.content = b"new content".to_vec();
    c.upsert(edited).unwrap();

    let att = c.attachment_mut(&uid).unwrap();
    assert_eq!(att.map_in(tmp.path()).unwrap(), mapped);
    assert_eq!(fs::read(&mapped).unwrap(), b"new content");

    c.unmap_all(&mut eraser()).unwrap();
    assert!(!mapped.exists());
}

#[test]
fn replacing_with_unmapped_clone_keeps_the_mapping() {
    let tmp = TempDir::new().unwrap();
    let mut c = Container::new();
    let uid = c
        .upsert(Attachment::from_bytes("a", "", b"before".to_vec()))
        .unwrap();
    // Cloned before mapping, so the clone knows nothing about the file.
    let mut edited = c.get::<Attachment>(&uid).unwrap().clone();
    let mapped = c.attachment_mut(&uid).unwrap().map_in(tmp.path()).unwrap();

    edited.title = "renamed".into();
    edited.content = b"after".to_vec();
    c.upsert(edited).unwrap();

    let att = c.get::<Attachment>(&uid).unwrap();
    assert_eq!(att.mapped_path(), Some(mapped.as_path()));
    assert_eq!(att.title, "renamed");
    assert_eq!(fs::read(&mapped).unwrap(), b"after");

    assert_eq!(c.unmap_all(&mut eraser()).unwrap(), 1);
    assert!(!mapped.exists());
}

#[test]
fn replacing_with_same_content_leaves_file_alone() {
    let tmp = TempDir::new().unwrap();
    let mut c = Container::new();
    let uid = c
        .upsert(Attachment::from_bytes("a", "", b"same".to_vec()))
        .unwrap();
    let mapped = c.attachment_mut(&uid).unwrap().map_in(tmp.path()).unwrap();

    let mut edited = c.get::<Attachment>(&uid).unwrap().clone();
    edited.category = "moved".into();
    c.upsert(edited).unwrap();

    assert_eq!(fs::read(&mapped).unwrap(), b"same");
    assert!(c.get::<Attachment>(&uid).unwrap().is_mapped());
    c.unmap_all(&mut eraser()).unwrap();
}

#[test]
fn upload_with_eraser_removes_source() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("recovery-codes.txt");
    fs::write(&source, b"1111-2222\n3333-4444\n").unwrap();

    let mut att = Attachment::new("2fa", "");
    let mut e = eraser();
    att.upload(&source, Some(&mut e as &mut dyn Eraser)).unwrap();

    assert!(!source.exists());
    assert_eq!(att.content, b"1111-2222\n3333-4444\n");
}

#[test]
fn mapped_state_is_not_saved() {
    let tmp = TempDir::new().unwrap();
    let mut c = Container::new();
    let uid = c
        .upsert(Attachment::from_bytes("blob", "", vec![7u8; 10]))
        .unwrap();
    let mapped = c.attachment_mut(&uid).unwrap().map_in(tmp.path()).unwrap();

    let bytes = c.save("pw").unwrap();
    let mut restored = Container::new();
    restored.load("pw", &bytes).unwrap();

    let att = restored.get::<Attachment>(&uid).unwrap();
    assert!(!att.is_mapped());
    assert_eq!(att.uid(), uid);
    assert_eq!(att.content, vec![7u8; 10]);

    c.unmap_all(&mut eraser()).unwrap();
    assert!(!mapped.exists());
}

#[test]
fn unmap_all_erases_every_mapped_file() {
    let tmp = TempDir::new().unwrap();
    let mut c = Container::new();
    let a = c.upsert(Attachment::from_bytes("a", "", b"aaa".to_vec())).unwrap();
    let b = c.upsert(Attachment::from_bytes("b", "", b"bbb".to_vec())).unwrap();
    c.upsert(Attachment::from_bytes("c", "", b"ccc".to_vec())).unwrap();

    let pa = c.attachment_mut(&a).unwrap().map_in(tmp.path()).unwrap();
    let pb = c.attachment_mut(&b).unwrap().map_in(tmp.path()).unwrap();

    assert_eq!(c.unmap_all(&mut eraser()).unwrap(), 2);
    assert!(!pa.exists());
    assert!(!pb.exists());
    assert_eq!(c.unmap_all(&mut eraser()).unwrap(), 0);
}

#[test]
fn export_writes_plaintext_copy() {
    let tmp = TempDir::new().unwrap();
    let dest = tmp.path().join("exported.bin");
    let att = Attachment::from_bytes("blob", "", vec![1u8, 2, 3, 4]);

    att.export_to(&dest).unwrap();
    assert_eq!(fs::read(&dest).unwrap(), vec![1u8, 2, 3, 4]);
}

#[test]
fn secure_erase_removes_file_of_any_size() {
    let tmp = TempDir::new().unwrap();
    for len in [0usize, 1, 65_536, 200_001] {
        let path = tmp.path().join(format!("f{len}"));
        fs::write(&path, vec![0xAA; len]).unwrap();
        secure_erase(&path, 3).unwrap();
        assert!(!path.exists(), "file of {len} bytes survived");
    }
}

#[test]
fn secure_erase_missing_file_fails() {
    let tmp = TempDir::new().unwrap();
    assert!(secure_erase(&tmp.path().join("ghost"), 1).is_err());
}
