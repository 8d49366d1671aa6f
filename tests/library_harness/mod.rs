//! Shared fixtures: an in-memory book/library service
//!
//! `book` references `library` under the link label `owner`. Books support
//! every operation; libraries are read-only.

#![allow(dead_code)]

use axum::Router;
use axum::http::{HeaderValue, header};
use axum_test::{TestRequest, TestServer};
use burrow::prelude::*;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

pub const HOST: &str = "host";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Book {
    pub id: i64,
    pub name: String,
    pub isbn: String,
    pub library_id: i64,
}

impl_record!(Book, "Book", id: "Id", refs: ["LibraryId" => "library" as "owner"]);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Library {
    pub id: i64,
}

impl_record!(Library, "library", id: "Id");

/// A record without an identifier field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Motd {
    pub text: String,
}

impl_record!(Motd, "motd");

#[derive(Default)]
pub struct Shelves {
    pub books: BTreeMap<i64, Book>,
    pub libraries: BTreeMap<i64, Library>,
    pub next_book_id: i64,
}

pub type Store = Arc<RwLock<Shelves>>;

/// One book `{Id:0, Name:"Dune", LibraryId:1}` and one library `{Id:1}`
pub fn seeded_store() -> Store {
    let mut shelves = Shelves::default();
    shelves.books.insert(
        0,
        Book {
            id: 0,
            name: "Dune".to_string(),
            isbn: "9780441013593".to_string(),
            library_id: 1,
        },
    );
    shelves.libraries.insert(1, Library { id: 1 });
    shelves.next_book_id = 1;
    Arc::new(RwLock::new(shelves))
}

fn not_found(kind: &str, id: i64) -> BurrowError {
    BurrowError::api(
        StatusCode::NOT_FOUND,
        format!("Could not find {} with id: {}", kind, id),
    )
}

pub fn book_resource(store: &Store) -> Resource<Book> {
    let creator = store.clone();
    let reader = store.clone();
    let lister = store.clone();
    let updater = store.clone();
    let deleter = store.clone();

    Resource::new(
        Accessors::new()
            .create(move || {
                let mut shelves = creator.write().unwrap();
                let book = Book {
                    id: shelves.next_book_id,
                    name: String::new(),
                    isbn: String::new(),
                    library_id: 1,
                };
                shelves.next_book_id += 1;
                shelves.books.insert(book.id, book.clone());
                Ok(book)
            })
            .read(move |id| {
                reader
                    .read()
                    .unwrap()
                    .books
                    .get(&id)
                    .cloned()
                    .ok_or_else(|| not_found("book", id))
            })
            .list(move || Ok(lister.read().unwrap().books.values().cloned().collect()))
            .update(move |book: Book| {
                updater.write().unwrap().books.insert(book.id, book);
                Ok(())
            })
            .delete(move |id| {
                deleter
                    .write()
                    .unwrap()
                    .books
                    .remove(&id)
                    .map(|_| ())
                    .ok_or_else(|| not_found("book", id))
            }),
    )
}

pub fn library_resource(store: &Store) -> Resource<Library> {
    let reader = store.clone();
    let lister = store.clone();

    Resource::new(
        Accessors::new()
            .read(move |id| {
                reader
                    .read()
                    .unwrap()
                    .libraries
                    .get(&id)
                    .cloned()
                    .ok_or_else(|| not_found("library", id))
            })
            .list(move || Ok(lister.read().unwrap().libraries.values().cloned().collect())),
    )
}

pub fn motd_resource() -> Resource<Motd> {
    Resource::new(Accessors::new().list(|| {
        Ok(vec![Motd {
            text: "welcome".to_string(),
        }])
    }))
}

/// Router with book, library and motd registered
pub fn build_router(store: &Store) -> Router {
    ServerBuilder::new()
        .register(book_resource(store))
        .unwrap()
        .register(library_resource(store))
        .unwrap()
        .register(motd_resource())
        .unwrap()
        .build()
        .unwrap()
}

pub fn make_server(store: &Store) -> TestServer {
    TestServer::try_new(build_router(store)).unwrap()
}

/// Address a request to [`HOST`]
pub fn on_host(request: TestRequest) -> TestRequest {
    request.add_header(header::HOST, HeaderValue::from_static(HOST))
}
