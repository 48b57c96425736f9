pub mod item_source;
pub mod judge;
pub mod library_store;

pub use item_source::IItemSource;
pub use judge::IJudge;
pub use library_store::ILibraryStore;
