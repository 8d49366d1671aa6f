//! Books and libraries with a labelled reference
//!
//! ```text
//! cargo run --example library
//! curl http://localhost:8080/
//! curl http://localhost:8080/book/2
//! curl -X PUT -d '{"Name": "Henry IV"}' http://localhost:8080/book/2
//! ```
//!
//! Set `BURROW_CONFIG` to a YAML file to override host, port and log level.

use burrow::prelude::*;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Book {
    id: i64,
    name: String,
    isbn: String,
    author: String,
    library_id: i64,
}

impl_record!(Book, "book", id: "Id", refs: ["LibraryId" => "library" as "owner"]);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Library {
    id: i64,
    name: String,
    location: String,
}

impl_record!(Library, "library", id: "Id");

fn lookup<T: Clone>(items: &RwLock<Vec<T>>, kind: &str, id: i64) -> Result<T, BurrowError> {
    let items = items
        .read()
        .map_err(|e| BurrowError::new(format!("Failed to acquire read lock: {}", e)))?;
    usize::try_from(id)
        .ok()
        .and_then(|index| items.get(index).cloned())
        .ok_or_else(|| {
            BurrowError::api(
                StatusCode::NOT_FOUND,
                format!("Could not find {} with id: {}", kind, id),
            )
        })
}

fn all<T: Clone>(items: &RwLock<Vec<T>>) -> Result<Vec<T>, BurrowError> {
    items
        .read()
        .map(|items| items.clone())
        .map_err(|e| BurrowError::new(format!("Failed to acquire read lock: {}", e)))
}

fn book(id: i64, name: &str, isbn: &str, author: &str, library_id: i64) -> Book {
    Book {
        id,
        name: name.to_string(),
        isbn: isbn.to_string(),
        author: author.to_string(),
        library_id,
    }
}

fn library(id: i64, name: &str, location: &str) -> Library {
    Library {
        id,
        name: name.to_string(),
        location: location.to_string(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::var("BURROW_CONFIG") {
        Ok(path) => ServerConfig::from_yaml_file(&path)?,
        Err(_) => ServerConfig::default(),
    };
    config.logging.init();

    let books = Arc::new(RwLock::new(vec![
        book(0, "Great Expectations", "345678", "Charles Dickens", 0),
        book(1, "Robinson Crusoe", "234567", "Daniel Defoe", 0),
        book(2, "Henry V", "123456", "William Shakespeare", 1),
    ]));
    let libraries = Arc::new(RwLock::new(vec![
        library(0, "Mountain View Public Library", "Mountain View"),
        library(1, "Cupertino Public Library", "Cupertino"),
    ]));

    let book_accessors = {
        let (reader, lister, updater) = (books.clone(), books.clone(), books.clone());
        Accessors::new()
            .read(move |id| lookup(&reader, "book", id))
            .list(move || all(&lister))
            .update(move |book: Book| {
                let mut books = updater
                    .write()
                    .map_err(|e| BurrowError::new(format!("Failed to acquire write lock: {}", e)))?;
                let slot = usize::try_from(book.id)
                    .ok()
                    .and_then(|index| books.get_mut(index))
                    .ok_or_else(|| BurrowError::api(StatusCode::NOT_FOUND, "No such book"))?;
                *slot = book;
                Ok(())
            })
    };

    let library_accessors = {
        let (reader, lister) = (libraries.clone(), libraries.clone());
        Accessors::new()
            .read(move |id| lookup(&reader, "library", id))
            .list(move || all(&lister))
    };

    ServerBuilder::new()
        .with_config(config)
        .register(Resource::<Book>::new(book_accessors))?
        .register(Resource::<Library>::new(library_accessors))?
        .serve()
        .await
}
