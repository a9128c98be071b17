use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use knit::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let context = Context::init(AppModule::new("greeter")).unwrap();
    let injector = Injector::new(context);

    let app: Injection<Rc<App>> = injector.inject(Target::component::<App>()).unwrap();
    app.run();
    app.close().unwrap();
}

struct AppModule {
    app_name: &'static str,
}

impl AppModule {
    fn new(app_name: &'static str) -> Self {
        Self { app_name }
    }
}

impl Module for AppModule {
    fn configure(&self, configurer: &mut dyn Configurer) -> Result<(), BoxError> {
        bind::<&'static str>("app_name")
            .to_instance(self.app_name)
            .set_on(configurer);

        bind_type::<Rc<dyn Logger>>()
            .to_scoped_component::<ConsoleLogger>()
            .set_on(configurer);

        bind::<Rc<dyn Greeter>>("english")
            .to_component::<EnglishGreeter>()
            .set_on(configurer);

        bind::<Rc<dyn Greeter>>("chinese")
            .to_component::<ChineseGreeter>()
            .set_on(configurer);

        bind_list::<Rc<dyn Greeter>>("greeters")
            .to_entries(["english", "chinese"])
            .set_on(configurer);

        Ok(())
    }
}

trait Logger {
    fn log(&self, message: &str);
}

/// Buffers lines while the session is open and prints them on release.
struct ConsoleLogger {
    app_name: &'static str,
    lines: Rc<RefCell<Vec<String>>>,
}

#[component]
impl ConsoleLogger {
    #[inject]
    pub fn new(app_name: &'static str) -> Self {
        Self {
            app_name,
            lines: Rc::default(),
        }
    }
}

impl Scoped for ConsoleLogger {
    type Target = Rc<dyn Logger>;

    type Error = Infallible;

    fn acquire(&mut self) -> Result<Self::Target, Self::Error> {
        Ok(Rc::new(BufferedLogger {
            lines: Rc::clone(&self.lines),
        }))
    }

    fn release(self) -> Result<(), Self::Error> {
        for line in self.lines.borrow().iter() {
            eprintln!("[{}] {}", self.app_name, line);
        }
        Ok(())
    }
}

struct BufferedLogger {
    lines: Rc<RefCell<Vec<String>>>,
}

impl Logger for BufferedLogger {
    fn log(&self, message: &str) {
        self.lines.borrow_mut().push(message.to_string());
    }
}

trait Greeter {
    fn greet(&self);
}

struct EnglishGreeter {
    logger: Rc<dyn Logger>,
}

#[component(Rc<dyn Greeter>, Rc::new)]
impl EnglishGreeter {
    #[inject]
    fn new(logger: Rc<dyn Logger>) -> Self {
        Self { logger }
    }
}

impl Greeter for EnglishGreeter {
    fn greet(&self) {
        self.logger.log("Hello World!");
    }
}

struct ChineseGreeter {
    logger: Rc<dyn Logger>,
}

#[component(Rc<dyn Greeter>, Rc::new)]
impl ChineseGreeter {
    #[inject]
    fn new(logger: Rc<dyn Logger>) -> Self {
        Self { logger }
    }
}

impl Greeter for ChineseGreeter {
    fn greet(&self) {
        self.logger.log("你好世界!");
    }
}

struct App {
    logger: Rc<dyn Logger>,
    greeters: Vec<Rc<dyn Greeter>>,
    punctuation: char,
}

#[component(Rc<App>, Rc::new)]
impl App {
    #[inject]
    fn new(
        logger: Rc<dyn Logger>,
        greeters: Vec<Rc<dyn Greeter>>,
        #[default('!')] punctuation: char,
    ) -> Self {
        Self {
            logger,
            greeters,
            punctuation,
        }
    }

    fn run(&self) {
        self.logger
            .log(&format!("Greeting from knit managed objects{}", self.punctuation));
        for greeter in &self.greeters {
            greeter.greet();
        }
    }
}
