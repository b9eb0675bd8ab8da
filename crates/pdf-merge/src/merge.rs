//! Document loading, saving, and the merge itself
//!
//! Merging moves every object of each subsequent document into the first
//! one, renumbered above its current id range, then splices the extra page
//! references into the primary page tree.

use lopdf::{Document, Object, ObjectId};
use std::path::Path;

use crate::types::{MergeError, Result};

/// Load a single PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    Ok(doc)
}

/// Load multiple PDF documents
pub async fn load_multiple_pdfs(paths: &[impl AsRef<Path>]) -> Result<Vec<Document>> {
    let mut documents = Vec::new();
    for path in paths {
        documents.push(load_pdf(path).await?);
    }
    Ok(documents)
}

/// Save the merged document
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || {
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok::<_, MergeError>(writer)
    })
    .await??;
    tokio::fs::write(&path, bytes).await?;
    Ok(())
}

/// Merge the documents into one, in input order.
pub async fn merge(documents: &[Document]) -> Result<Document> {
    if documents.len() < 2 {
        return Err(MergeError::NotEnoughInputs(documents.len()));
    }

    let documents = documents.to_vec();
    tokio::task::spawn_blocking(move || merge_sync(documents)).await?
}

fn merge_sync(documents: Vec<Document>) -> Result<Document> {
    let mut iter = documents.into_iter();
    let Some(mut merged) = iter.next() else {
        return Err(MergeError::NotEnoughInputs(0));
    };

    for document in iter {
        merged = append_document(merged, document)?;
    }

    log::debug!("merged document holds {} pages", merged.get_pages().len());
    Ok(merged)
}

/// Append every page of `secondary` to `primary`.
fn append_document(mut primary: Document, mut secondary: Document) -> Result<Document> {
    // Lift the secondary's object ids above the primary's range so the two
    // object tables can simply be unioned.
    let start_id = primary.max_id + 1;
    secondary.renumber_objects_with(start_id);

    let secondary_pages: Vec<ObjectId> = secondary.page_iter().collect();

    for (id, object) in secondary.objects.into_iter() {
        primary.objects.insert(id, object);
    }
    if secondary.max_id > primary.max_id {
        primary.max_id = secondary.max_id;
    }

    let pages_root_id = primary
        .catalog()
        .map_err(|e| MergeError::MalformedDocument(format!("no catalog: {e}")))?
        .get(b"Pages")
        .and_then(Object::as_reference)
        .map_err(|_| MergeError::MalformedDocument("catalog has no Pages entry".into()))?;

    {
        let pages_dict = primary
            .get_object_mut(pages_root_id)
            .and_then(Object::as_dict_mut)
            .map_err(|_| MergeError::MalformedDocument("missing pages dictionary".into()))?;
        let kids = pages_dict
            .get_mut(b"Kids")
            .and_then(Object::as_array_mut)
            .map_err(|_| MergeError::MalformedDocument("pages dictionary has no Kids".into()))?;
        for page_id in &secondary_pages {
            kids.push(Object::Reference(*page_id));
        }

        let count = pages_dict
            .get(b"Count")
            .and_then(Object::as_i64)
            .unwrap_or(0);
        pages_dict.set("Count", count + secondary_pages.len() as i64);
    }

    // The moved pages still point at the secondary's page tree root.
    for page_id in secondary_pages {
        if let Ok(page_dict) = primary.get_object_mut(page_id).and_then(Object::as_dict_mut) {
            page_dict.set("Parent", pages_root_id);
        }
    }

    Ok(primary)
}
