pub(crate) mod friends;
