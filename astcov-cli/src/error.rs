error_chain! {
    links {
        Astcov(::astcov::error::Error, ::astcov::error::ErrorKind);
    }

    foreign_links {
        Io(::std::io::Error);
        Json(::serde_json::Error);
    }
}
