use crate::communication::channel::ChannelFactory;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct HubLimits {
    /// Treat a peer whose endpoint closed without `dying` as departed. When disabled the
    /// peer stays registered and the hub stops listening to it.
    pub detect_disconnects: bool,
}

impl Default for HubLimits {
    fn default() -> Self {
        HubLimits {
            detect_disconnects: true,
        }
    }
}

#[derive(Debug)]
pub struct HubConfiguration<Cf>
where
    Cf: ChannelFactory,
{
    pub channel_factory: Cf,
    pub limits: HubLimits,
}

impl<Cf> HubConfiguration<Cf>
where
    Cf: ChannelFactory,
{
    pub fn new(channel_factory: Cf) -> HubConfiguration<Cf> {
        HubConfiguration {
            channel_factory,
            limits: HubLimits::default(),
        }
    }
}
