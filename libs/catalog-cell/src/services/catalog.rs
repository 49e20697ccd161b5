use tracing::debug;

use crate::models::{Provider, Service};

/// Read-only lookup of services and the providers offering them.
pub trait ProviderCatalog: Send + Sync {
    fn services(&self) -> Vec<Service>;

    fn service(&self, service_id: &str) -> Option<Service>;

    fn provider(&self, provider_id: &str) -> Option<Provider>;

    fn providers_by_service(&self, service_id: &str) -> Vec<Provider> {
        self.service(service_id)
            .map(|service| service.providers)
            .unwrap_or_default()
    }

    /// Average minutes per appointment for a provider, if the provider exists.
    fn average_wait_time(&self, provider_id: &str) -> Option<u32> {
        self.provider(provider_id)
            .map(|provider| provider.average_wait_time)
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    services: Vec<Service>,
}

impl StaticCatalog {
    pub fn new(services: Vec<Service>) -> Self {
        Self { services }
    }

    /// The demo catalog the booking front end ships with.
    pub fn seeded() -> Self {
        Self::new(vec![
            Service {
                id: "s1".to_string(),
                name: "Medical Consultation".to_string(),
                description: "General check-up and consultation with a doctor".to_string(),
                icon: "🩺".to_string(),
                providers: vec![
                    provider("p1", "Dr. Jane Smith", "General Medicine", 15),
                    provider("p2", "Dr. Michael Chen", "Family Medicine", 20),
                ],
            },
            Service {
                id: "s2".to_string(),
                name: "Dental Care".to_string(),
                description: "Dental checkup, cleaning, and consultation".to_string(),
                icon: "🦷".to_string(),
                providers: vec![provider("p3", "Dr. Sarah Johnson", "General Dentistry", 25)],
            },
            Service {
                id: "s3".to_string(),
                name: "Hair Salon".to_string(),
                description: "Haircuts, styling, and treatments".to_string(),
                icon: "✂️".to_string(),
                providers: vec![
                    provider("p4", "Alex Rodriguez", "Hair Stylist", 30),
                    provider("p5", "Jamie Lee", "Color Specialist", 45),
                ],
            },
            Service {
                id: "s4".to_string(),
                name: "Banking Services".to_string(),
                description: "Account services and financial consultation".to_string(),
                icon: "🏦".to_string(),
                providers: vec![provider("p6", "Taylor Morgan", "Personal Banking", 10)],
            },
        ])
    }
}

fn provider(id: &str, name: &str, specialization: &str, average_wait_time: u32) -> Provider {
    Provider {
        id: id.to_string(),
        name: name.to_string(),
        specialization: specialization.to_string(),
        image: None,
        average_wait_time,
    }
}

impl ProviderCatalog for StaticCatalog {
    fn services(&self) -> Vec<Service> {
        self.services.clone()
    }

    fn service(&self, service_id: &str) -> Option<Service> {
        self.services.iter().find(|s| s.id == service_id).cloned()
    }

    fn provider(&self, provider_id: &str) -> Option<Provider> {
        let found = self
            .services
            .iter()
            .flat_map(|service| service.providers.iter())
            .find(|p| p.id == provider_id)
            .cloned();

        if found.is_none() {
            debug!("Provider {} not in catalog", provider_id);
        }
        found
    }
}
