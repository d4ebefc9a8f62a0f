pub(crate) mod sequential;
