use hal::{Delay, Display, InterruptMask, MotionSource, RegisterBus};

pub trait Board
where
    Self: Sized,
{
    type Bus: RegisterBus;
    type Motion: MotionSource;
    type Mask: InterruptMask;
    type Display: Display;
    type Delay: Delay;

    fn name(&self) -> &str;

    fn split_resources(self) -> Resources<Self>;
}

pub struct Resources<B: Board> {
    pub bus: B::Bus,
    pub motion: B::Motion,
    pub mask: B::Mask,
    pub display: B::Display,
    pub delay: B::Delay,
}
