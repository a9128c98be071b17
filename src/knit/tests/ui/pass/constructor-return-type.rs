use std::convert::Infallible;
use std::fmt;
use std::rc::Rc;

use knit::prelude::*;

#[derive(Debug)]
pub struct InvalidPort(u16);

impl fmt::Display for InvalidPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid port {}", self.0)
    }
}

impl std::error::Error for InvalidPort {}

pub trait Listener {
    fn port(&self) -> u16;
}

#[derive(Clone)]
pub struct Plain {
    pub port: u16,
}

#[component]
impl Plain {
    #[inject]
    pub fn new(#[default(80)] port: u16) -> Self {
        Self { port }
    }
}

#[derive(Clone)]
pub struct Named;

#[component]
impl Named {
    #[inject]
    pub fn new(#[named("listen_port")] _port: u16) -> Named {
        Named
    }
}

#[derive(Clone)]
pub struct Checked {
    pub port: u16,
}

#[component]
impl Checked {
    #[inject]
    pub fn new(#[named("listen_port")] #[default] port: u16) -> Result<Self, InvalidPort> {
        if port == 0 {
            Err(InvalidPort(port))
        } else {
            Ok(Self { port })
        }
    }
}

pub struct Shared {
    pub port: u16,
}

#[component(Rc<Shared>, Rc::new)]
impl Shared {
    #[inject]
    pub fn new(port: u16) -> Result<Shared, Infallible> {
        Ok(Self { port })
    }
}

pub struct Tcp {
    port: u16,
}

impl Listener for Tcp {
    fn port(&self) -> u16 {
        self.port
    }
}

fn into_listener(tcp: Tcp) -> Rc<dyn Listener> {
    Rc::new(tcp)
}

#[component(Rc<dyn Listener>, into_listener)]
impl Tcp {
    #[inject]
    pub fn bind(#[default(8080)] port: u16) -> std::result::Result<Tcp, InvalidPort> {
        Ok(Self { port })
    }
}

pub struct Unit;

#[component(Rc<Unit>, Rc::new)]
impl Unit {
    #[inject]
    pub fn new() -> core::result::Result<Self, Infallible> {
        Ok(Unit)
    }
}

fn main() {
    let _ = Target::<Plain>::component::<Plain>();
    let _ = Target::<Named>::component::<Named>();
    let _ = Target::<Checked>::component::<Checked>();
    let _ = Target::<Rc<Shared>>::component::<Shared>();
    let _ = Target::<Rc<dyn Listener>>::component::<Tcp>();
    let _ = Target::<Rc<Unit>>::component::<Unit>();
}
