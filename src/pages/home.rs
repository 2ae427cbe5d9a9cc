use leptos::prelude::*;
use log::info;

use crate::components::topic_graph::{GraphData, TopicClicked, TopicGraphCanvas};

/// Seven co-trending topics across platforms and how they relate.
const SAMPLE_TOPICS: &str = r##"{
	"nodes": [
		{"id": "1", "platform": "twitter", "topic": "AI Revolution",
		 "likes": 45200, "dislikes": 1200, "shares": 8900, "comments": 3400,
		 "x": 200, "y": 150, "color": "#3B82F6"},
		{"id": "2", "platform": "youtube", "topic": "Tech Reviews",
		 "likes": 125000, "dislikes": 3200, "shares": 15600, "comments": 8700,
		 "x": 500, "y": 200, "color": "#EF4444"},
		{"id": "3", "platform": "reddit", "topic": "Web Development",
		 "likes": 32100, "dislikes": 890, "shares": 4500, "comments": 12300,
		 "x": 350, "y": 400, "color": "#F59E0B"},
		{"id": "4", "platform": "google", "topic": "Climate Change",
		 "likes": 67800, "dislikes": 5600, "shares": 23400, "comments": 15600,
		 "x": 700, "y": 350, "color": "#10B981"},
		{"id": "5", "platform": "twitter", "topic": "Crypto Trends",
		 "likes": 89000, "dislikes": 12300, "shares": 34500, "comments": 23400,
		 "x": 850, "y": 150, "color": "#8B5CF6"},
		{"id": "6", "platform": "youtube", "topic": "Gaming News",
		 "likes": 234000, "dislikes": 8900, "shares": 45600, "comments": 34500,
		 "x": 150, "y": 450, "color": "#EC4899"},
		{"id": "7", "platform": "reddit", "topic": "Space Exploration",
		 "likes": 156000, "dislikes": 2300, "shares": 67800, "comments": 45600,
		 "x": 600, "y": 500, "color": "#06B6D4"}
	],
	"links": [
		{"from": "1", "to": "2"},
		{"from": "1", "to": "3"},
		{"from": "2", "to": "4"},
		{"from": "3", "to": "4"},
		{"from": "2", "to": "5"},
		{"from": "4", "to": "7"},
		{"from": "3", "to": "6"},
		{"from": "6", "to": "7"}
	]
}"##;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let graph = GraphData::from_json(SAMPLE_TOPICS);
	let on_topic_click = Callback::new(|clicked: TopicClicked| {
		info!("Clicked node: {} ({})", clicked.topic, clicked.id);
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				{graph
					.map(|data| {
						view! {
							<TopicGraphCanvas
								data=Signal::derive(move || data.clone())
								fullscreen=true
								on_topic_click=on_topic_click
							/>
						}
					})}
				<div class="graph-overlay">
					<h1>"Topic Network"</h1>
					<p class="subtitle">"Hover over nodes to see connections. Click for details."</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sample_topics_parse() {
		let data = GraphData::from_json(SAMPLE_TOPICS).unwrap();
		assert_eq!(data.nodes.len(), 7);
		assert_eq!(data.links.len(), 8);
		assert_eq!(data.nodes[6].topic, "Space Exploration");
	}
}
