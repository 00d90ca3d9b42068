pub(crate) mod encoder_events;
pub mod recording;

#[cfg(test)]
mod test_support;
