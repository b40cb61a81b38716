use crate::image::ImageBuffer;

/// Anything that can fill a source image once per frame
pub trait FrameProducer {
    /// Draw the current state into `image`, replacing its contents
    fn render(&self, image: &mut ImageBuffer);

    /// Step the animation by one frame
    fn advance(&mut self) {}

    /// Name for logging
    fn name(&self) -> &str {
        "Producer"
    }
}
