// Crate-internal.
// ---

pub(crate) mod standard_auth {
    pub(crate) mod role_permissions;
}

pub(crate) mod standard_backends {
    pub(crate) mod in_memory_backend;
}

pub(crate) mod standard_storage {
    pub(crate) mod json_file_storage;
    pub(crate) mod memory_storage;
}

// Public exports.
// ---

pub mod exports {
    // This mod represents how clients see the library, and can differ from the
    // internal structure.
    //
    // The contents of this mod are re-exported in the root of the crate.

    pub mod standard_auth {
        pub use crate::impl_ext::standard_auth::role_permissions::*;
    }

    pub mod standard_backends {
        pub use crate::impl_ext::standard_backends::in_memory_backend::*;
    }

    pub mod standard_storage {
        pub use crate::impl_ext::standard_storage::json_file_storage::*;
        pub use crate::impl_ext::standard_storage::memory_storage::*;
    }
}
