use lopdf::{Dictionary, Document, Object, Stream};
use pdf_merge::*;

/// Build an in-memory PDF with `num_pages` pages of the given width.
fn create_test_pdf(num_pages: usize, page_width: i64) -> Document {
    let mut doc = Document::with_version("1.7");

    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for _ in 0..num_pages {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(page_width),
                    Object::Integer(792),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    doc.trailer.set("Root", catalog_id);

    doc
}

fn page_widths(doc: &Document) -> Vec<i64> {
    doc.page_iter()
        .map(|page_id| {
            let dict = doc.get_dictionary(page_id).unwrap();
            let media_box = dict.get(b"MediaBox").unwrap().as_array().unwrap();
            media_box[2].as_i64().unwrap()
        })
        .collect()
}

#[tokio::test]
async fn test_merge_combines_all_pages_in_order() {
    let first = create_test_pdf(3, 612);
    let second = create_test_pdf(2, 500);
    let third = create_test_pdf(4, 400);

    let merged = merge(&[first, second, third]).await.unwrap();

    assert_eq!(merged.get_pages().len(), 9);
    assert_eq!(
        page_widths(&merged),
        [612, 612, 612, 500, 500, 400, 400, 400, 400]
    );
}

#[tokio::test]
async fn test_merge_requires_two_documents() {
    let doc = create_test_pdf(5, 612);
    let result = merge(&[doc]).await;
    assert!(matches!(result, Err(MergeError::NotEnoughInputs(1))));

    let result = merge(&[]).await;
    assert!(matches!(result, Err(MergeError::NotEnoughInputs(0))));
}

#[tokio::test]
async fn test_merged_document_survives_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("merged.pdf");

    let first = create_test_pdf(2, 612);
    let second = create_test_pdf(3, 612);
    let merged = merge(&[first, second]).await.unwrap();

    save_pdf(merged, &path).await.unwrap();

    let reloaded = load_pdf(&path).await.unwrap();
    assert_eq!(reloaded.get_pages().len(), 5);
}

#[tokio::test]
async fn test_load_multiple_pdfs_preserves_order() {
    let dir = tempfile::tempdir().unwrap();
    let path_a = dir.path().join("a.pdf");
    let path_b = dir.path().join("b.pdf");

    save_pdf(create_test_pdf(1, 612), &path_a).await.unwrap();
    save_pdf(create_test_pdf(2, 612), &path_b).await.unwrap();

    let docs = load_multiple_pdfs(&[&path_a, &path_b]).await.unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].get_pages().len(), 1);
    assert_eq!(docs[1].get_pages().len(), 2);
}

#[tokio::test]
async fn test_load_pdf_rejects_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("not-a-pdf.pdf");
    tokio::fs::write(&path, b"hello").await.unwrap();

    assert!(matches!(load_pdf(&path).await, Err(MergeError::Pdf(_))));
}
